// src/handlers/inventory.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppPath},
    },
    config::AppState,
    middleware::rbac::{OperatorOrAbove, RequireRole},
    models::inventory::{Ticket, Voyage, VoyageChanges, VoyageDetail, VoyageStatus},
};

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// =============================================================================
//  1. EMBARQUES
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoyagePayload {
    pub vessel_id: Uuid,
    pub route_id: Uuid,
    pub departure_at: DateTime<Utc>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = f64, example = 45.0)]
    pub price: Decimal,

    // Sem valor => capacidade da embarcação
    #[validate(range(min = 0, message = "Os assentos não podem ser negativos."))]
    #[schema(example = 120)]
    pub seats_available: Option<i32>,
}

// POST /api/operador/embarques
#[utoipa::path(
    post,
    path = "/api/operador/embarques",
    tag = "Operador",
    request_body = CreateVoyagePayload,
    responses(
        (status = 201, description = "Embarque criado", body = Voyage),
        (status = 404, description = "Embarcação ou rota não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_voyage(
    State(app_state): State<AppState>,
    _guard: RequireRole<OperatorOrAbove>,
    AppJson(payload): AppJson<CreateVoyagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let voyage = app_state
        .inventory_service
        .create_voyage(
            payload.vessel_id,
            payload.route_id,
            payload.departure_at,
            payload.price,
            payload.seats_available,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(voyage)))
}

// GET /api/operador/embarques/{id}
#[utoipa::path(
    get,
    path = "/api/operador/embarques/{id}",
    tag = "Operador",
    responses(
        (status = 200, description = "Embarque com as passagens emitidas", body = VoyageDetail),
        (status = 404, description = "Embarque não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do Embarque")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_voyage(
    State(app_state): State<AppState>,
    _guard: RequireRole<OperatorOrAbove>,
    AppPath(voyage_id): AppPath<Uuid>,
) -> Result<Json<VoyageDetail>, AppError> {
    let detail = app_state.inventory_service.get_voyage(voyage_id).await?;
    Ok(Json(detail))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVoyagePayload {
    pub departure_at: Option<DateTime<Utc>>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = Option<f64>, example = 50.0)]
    pub price: Option<Decimal>,

    // Sobrescreve o contador de assentos (correção administrativa)
    #[validate(range(min = 0, message = "Os assentos não podem ser negativos."))]
    pub seats_available: Option<i32>,

    #[schema(example = "IN_PROGRESS")]
    pub status: Option<VoyageStatus>,
}

// PUT /api/operador/embarques/{id}
#[utoipa::path(
    put,
    path = "/api/operador/embarques/{id}",
    tag = "Operador",
    request_body = UpdateVoyagePayload,
    responses(
        (status = 200, description = "Embarque atualizado", body = Voyage),
        (status = 404, description = "Embarque não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do Embarque")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_voyage(
    State(app_state): State<AppState>,
    _guard: RequireRole<OperatorOrAbove>,
    AppPath(voyage_id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateVoyagePayload>,
) -> Result<Json<Voyage>, AppError> {
    payload.validate()?;

    let voyage = app_state
        .inventory_service
        .update_voyage(
            voyage_id,
            VoyageChanges {
                departure_at: payload.departure_at,
                price: payload.price,
                seats_available: payload.seats_available,
                status: payload.status,
            },
        )
        .await?;

    Ok(Json(voyage))
}

// =============================================================================
//  2. PASSAGENS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueTicketPayload {
    pub voyage_id: Uuid,
    pub passenger_id: Uuid,

    #[schema(example = "A12")]
    pub seat_label: Option<String>,

    // Sem valor => preço do embarque
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = Option<f64>, example = 45.0)]
    pub amount_paid: Option<Decimal>,

    #[schema(example = "PIX")]
    pub payment_method: Option<String>,
}

// POST /api/operador/passagens
#[utoipa::path(
    post,
    path = "/api/operador/passagens",
    tag = "Operador",
    request_body = IssueTicketPayload,
    responses(
        (status = 201, description = "Passagem emitida", body = Ticket),
        (status = 400, description = "Não há assentos disponíveis"),
        (status = 404, description = "Embarque ou passageiro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn issue_ticket(
    State(app_state): State<AppState>,
    _guard: RequireRole<OperatorOrAbove>,
    AppJson(payload): AppJson<IssueTicketPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ticket = app_state
        .inventory_service
        .issue_ticket(
            payload.voyage_id,
            payload.passenger_id,
            payload.seat_label,
            payload.amount_paid,
            payload.payment_method,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

// Aceita qualquer JSON em `status`: ausente, nulo, não-texto ou desconhecido
// viram o mesmo 400 "Status inválido" no serviço.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTicketStatusPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "CANCELLED")]
    pub status: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TicketStatusResponse {
    pub message: String,
    pub ticket: Ticket,
}

// PUT /api/operador/passagens/{id}/status
#[utoipa::path(
    put,
    path = "/api/operador/passagens/{id}/status",
    tag = "Operador",
    request_body = UpdateTicketStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = TicketStatusResponse),
        (status = 400, description = "Status inválido"),
        (status = 404, description = "Passagem não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da Passagem")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_ticket_status(
    State(app_state): State<AppState>,
    _guard: RequireRole<OperatorOrAbove>,
    AppPath(ticket_id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateTicketStatusPayload>,
) -> Result<Json<TicketStatusResponse>, AppError> {
    let status = payload.status.as_ref().and_then(|v| v.as_str()).unwrap_or_default();

    let ticket = app_state
        .inventory_service
        .set_ticket_status(ticket_id, status)
        .await?;

    Ok(Json(TicketStatusResponse {
        message: "Status atualizado".into(),
        ticket,
    }))
}
