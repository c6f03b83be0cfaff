// src/models/passenger.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub id: Uuid,
    #[schema(example = "João da Silva")]
    pub name: String,
    // CPF (único)
    #[schema(example = "123.456.789-00")]
    pub tax_id: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPassenger {
    pub name: String,
    pub tax_id: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

// O CPF não muda depois do cadastro.
#[derive(Debug, Clone, Default)]
pub struct PassengerChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}
