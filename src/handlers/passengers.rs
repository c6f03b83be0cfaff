// src/handlers/passengers.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppPath},
    },
    config::AppState,
    middleware::rbac::{OperatorOrAbove, RequireRole},
    models::passenger::{Passenger, PassengerChanges},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePassengerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "João da Silva")]
    pub name: String,

    #[serde(alias = "cpf")]
    #[validate(length(min = 1, message = "O CPF é obrigatório."))]
    #[schema(example = "123.456.789-00")]
    pub tax_id: String,

    pub phone: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
}

// POST /api/operador/passageiros
#[utoipa::path(
    post,
    path = "/api/operador/passageiros",
    tag = "Operador",
    request_body = CreatePassengerPayload,
    responses(
        (status = 201, description = "Passageiro cadastrado", body = Passenger),
        (status = 409, description = "CPF já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_passenger(
    State(app_state): State<AppState>,
    _guard: RequireRole<OperatorOrAbove>,
    AppJson(payload): AppJson<CreatePassengerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let passenger = app_state
        .passenger_service
        .create_passenger(&payload.name, &payload.tax_id, payload.phone, payload.email)
        .await?;

    Ok((StatusCode::CREATED, Json(passenger)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePassengerPayload {
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub name: Option<String>,

    pub phone: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
}

// PUT /api/operador/passageiros/{id}
#[utoipa::path(
    put,
    path = "/api/operador/passageiros/{id}",
    tag = "Operador",
    request_body = UpdatePassengerPayload,
    responses(
        (status = 200, description = "Passageiro atualizado", body = Passenger),
        (status = 404, description = "Passageiro não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do Passageiro")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_passenger(
    State(app_state): State<AppState>,
    _guard: RequireRole<OperatorOrAbove>,
    AppPath(passenger_id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdatePassengerPayload>,
) -> Result<Json<Passenger>, AppError> {
    payload.validate()?;

    let passenger = app_state
        .passenger_service
        .update_passenger(
            passenger_id,
            PassengerChanges {
                name: payload.name,
                phone: payload.phone,
                email: payload.email,
            },
        )
        .await?;

    Ok(Json(passenger))
}
