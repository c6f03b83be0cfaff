use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Erro único da aplicação. Só as falhas internas são logadas;
// o resto é fluxo normal reportado ao cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Corpo ou parâmetro de rota que nem chegou a ser desserializado
    #[error("{0}")]
    BadRequest(String),

    // --- Autenticação / Autorização ---
    #[error("Token não fornecido")]
    MissingToken,

    #[error("Token inválido ou expirado")]
    InvalidToken,

    #[error("Usuário não encontrado ou inativo")]
    InactivePrincipal,

    #[error("Não autenticado")]
    Unauthenticated,

    #[error("Acesso negado: {0}")]
    Forbidden(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Conta desativada")]
    AccountDisabled,

    #[error("Senha atual incorreta")]
    WrongCurrentPassword,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Usuário não encontrado")]
    UserNotFound,

    // --- Inventário de assentos ---
    #[error("Embarque não encontrado")]
    VoyageNotFound,

    #[error("Passagem não encontrada")]
    TicketNotFound,

    #[error("Não há assentos disponíveis")]
    SoldOut,

    #[error("Status inválido")]
    InvalidStatus,

    // --- Cadastros ---
    #[error("Passageiro não encontrado")]
    PassengerNotFound,

    #[error("CPF já cadastrado")]
    TaxIdAlreadyExists,

    #[error("Embarcação não encontrada")]
    VesselNotFound,

    #[error("Rota não encontrada")]
    RouteNotFound,

    // --- Falhas internas ---
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::BadRequest(_)
            | AppError::SoldOut
            | AppError::InvalidStatus => StatusCode::BAD_REQUEST,

            AppError::MissingToken
            | AppError::InvalidToken
            | AppError::InactivePrincipal
            | AppError::Unauthenticated
            | AppError::InvalidCredentials
            | AppError::AccountDisabled
            | AppError::WrongCurrentPassword => StatusCode::UNAUTHORIZED,

            AppError::Forbidden(_) => StatusCode::FORBIDDEN,

            AppError::UserNotFound
            | AppError::VoyageNotFound
            | AppError::TicketNotFound
            | AppError::PassengerNotFound
            | AppError::VesselNotFound
            | AppError::RouteNotFound => StatusCode::NOT_FOUND,

            AppError::EmailAlreadyExists | AppError::TaxIdAlreadyExists => StatusCode::CONFLICT,

            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Corpo da requisição inválido: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(format!("Parâmetro de rota inválido: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                })
            }
            AppError::Forbidden(message) => json!({
                "error": "Acesso negado",
                "message": message,
            }),
            ref e if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                json!({ "error": "Ocorreu um erro inesperado." })
            }
            e => json!({ "error": e.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
