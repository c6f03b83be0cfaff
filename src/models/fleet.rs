// src/models/fleet.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Embarcação ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vessel {
    pub id: Uuid,
    #[schema(example = "Navio Afuá I")]
    pub name: String,
    #[schema(example = 120)]
    pub capacity: i32,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVessel {
    pub name: String,
    pub capacity: i32,
    pub description: Option<String>,
}

// --- Rota ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: Uuid,
    #[schema(example = "Macapá")]
    pub origin: String,
    #[schema(example = "Afuá")]
    pub destination: String,
    #[schema(example = "8h")]
    pub duration: Option<String>,
    #[schema(example = "180 km")]
    pub distance: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRoute {
    pub origin: String,
    pub destination: String,
    pub duration: Option<String>,
    pub distance: Option<String>,
}
