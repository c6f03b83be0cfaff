// src/handlers/fleet.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    middleware::rbac::{OperatorOrAbove, RequireRole},
    models::fleet::{Route, Vessel},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVesselPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Navio Afuá I")]
    pub name: String,

    #[validate(range(min = 1, message = "A capacidade deve ser maior que zero."))]
    #[schema(example = 120)]
    pub capacity: i32,

    pub description: Option<String>,
}

// POST /api/operador/embarcacoes
#[utoipa::path(
    post,
    path = "/api/operador/embarcacoes",
    tag = "Operador",
    request_body = CreateVesselPayload,
    responses(
        (status = 201, description = "Embarcação criada", body = Vessel)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_vessel(
    State(app_state): State<AppState>,
    _guard: RequireRole<OperatorOrAbove>,
    AppJson(payload): AppJson<CreateVesselPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let vessel = app_state
        .fleet_service
        .create_vessel(&payload.name, payload.capacity, payload.description)
        .await?;

    Ok((StatusCode::CREATED, Json(vessel)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoutePayload {
    #[validate(length(min = 1, message = "A origem é obrigatória."))]
    #[schema(example = "Macapá")]
    pub origin: String,

    #[validate(length(min = 1, message = "O destino é obrigatório."))]
    #[schema(example = "Afuá")]
    pub destination: String,

    pub duration: Option<String>,
    pub distance: Option<String>,
}

// POST /api/operador/rotas
#[utoipa::path(
    post,
    path = "/api/operador/rotas",
    tag = "Operador",
    request_body = CreateRoutePayload,
    responses(
        (status = 201, description = "Rota criada", body = Route)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_route(
    State(app_state): State<AppState>,
    _guard: RequireRole<OperatorOrAbove>,
    AppJson(payload): AppJson<CreateRoutePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let route = app_state
        .fleet_service
        .create_route(&payload.origin, &payload.destination, payload.duration, payload.distance)
        .await?;

    Ok((StatusCode::CREATED, Json(route)))
}
