// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Status do Embarque ---
// Os aliases aceitam os nomes em português usados pelo frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "voyage_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoyageStatus {
    #[serde(alias = "AGENDADO")]
    Scheduled,
    #[serde(alias = "EM_ANDAMENTO")]
    InProgress,
    #[serde(alias = "CONCLUIDO")]
    Completed,
    #[serde(alias = "CANCELADO")]
    Cancelled,
}

// --- Status da Passagem ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "ticket_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[serde(alias = "CONFIRMADA")]
    Confirmed,
    #[serde(alias = "CANCELADA")]
    Cancelled,
    #[serde(alias = "UTILIZADA")]
    Used,
}

impl TicketStatus {
    /// Converte o valor recebido na API. `None` para qualquer status desconhecido.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "CONFIRMED" | "CONFIRMADA" => Some(Self::Confirmed),
            "CANCELLED" | "CANCELADA" => Some(Self::Cancelled),
            "USED" | "UTILIZADA" => Some(Self::Used),
            _ => None,
        }
    }

    /// Uma passagem ocupa assento em qualquer status que não seja CANCELLED.
    pub fn holds_seat(self) -> bool {
        self != Self::Cancelled
    }
}

// --- Embarque (viagem agendada) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Voyage {
    pub id: Uuid,
    pub vessel_id: Uuid,
    pub route_id: Uuid,
    pub departure_at: DateTime<Utc>,
    #[schema(value_type = f64, example = 45.0)]
    pub price: Decimal,
    // Capacidade fixada na criação; referência do invariante de assentos.
    #[schema(example = 120)]
    pub total_seats: i32,
    #[schema(example = 118)]
    pub seats_available: i32,
    pub status: VoyageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVoyage {
    pub vessel_id: Uuid,
    pub route_id: Uuid,
    pub departure_at: DateTime<Utc>,
    pub price: Decimal,
    // None => capacidade da embarcação
    pub seats: Option<i32>,
}

/// Atualização parcial de um embarque. Só os campos `Some` mudam.
///
/// `seats_available` sobrescreve o contador diretamente, sem reconciliar
/// com as passagens emitidas.
#[derive(Debug, Clone, Default)]
pub struct VoyageChanges {
    pub departure_at: Option<DateTime<Utc>>,
    pub price: Option<Decimal>,
    pub seats_available: Option<i32>,
    pub status: Option<VoyageStatus>,
}

// --- Passagem ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub voyage_id: Uuid,
    pub passenger_id: Uuid,
    #[schema(example = "A12")]
    pub seat_label: Option<String>,
    #[schema(value_type = f64, example = 45.0)]
    pub amount_paid: Decimal,
    #[schema(example = "PIX")]
    pub payment_method: String,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Passagem pronta para inserção: os padrões (valor e forma de pagamento)
// são resolvidos pelo serviço/repositório.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub voyage_id: Uuid,
    pub passenger_id: Uuid,
    pub seat_label: Option<String>,
    // None => preço do embarque
    pub amount_paid: Option<Decimal>,
    pub payment_method: String,
}

// Embarque com as passagens emitidas (mais recentes primeiro)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoyageDetail {
    #[serde(flatten)]
    pub voyage: Voyage,
    pub tickets: Vec<Ticket>,
}
