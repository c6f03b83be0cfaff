// src/handlers/admin.rs

use axum::{
    extract::State,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppPath},
    },
    config::AppState,
    handlers::auth::ProfileResponse,
    middleware::rbac::{AdminOnly, RequireRole},
    models::auth::SetUserActivePayload,
};

// PUT /api/admin/users/{id}/active
// Desativar não apaga o usuário; os tokens dele param de valer na hora.
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/active",
    tag = "Admin",
    request_body = SetUserActivePayload,
    responses(
        (status = 200, description = "Status de acesso alterado", body = ProfileResponse),
        (status = 403, description = "Requer ADMIN"),
        (status = 404, description = "Usuário não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do Usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_user_active(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    AppPath(user_id): AppPath<Uuid>,
    AppJson(payload): AppJson<SetUserActivePayload>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = app_state
        .auth_service
        .set_user_active(user_id, payload.active)
        .await?;

    let message = if user.is_active {
        "Usuário ativado"
    } else {
        "Usuário desativado"
    };

    Ok(Json(ProfileResponse {
        message: message.into(),
        user,
    }))
}
