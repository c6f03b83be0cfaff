// src/services/inventory_service.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::InventoryStore,
    models::inventory::{NewTicket, NewVoyage, Ticket, TicketStatus, Voyage, VoyageChanges, VoyageDetail},
};

/// Gestão do inventário de assentos: emissão e cancelamento de passagens
/// e manutenção dos embarques.
///
/// A exclusão mútua sobre `seats_available` é responsabilidade do
/// `InventoryStore`; este serviço não guarda estado nem segura locks.
#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: Arc<dyn InventoryStore>,
    default_payment_method: String,
}

impl InventoryService {
    pub fn new(inventory_repo: Arc<dyn InventoryStore>, default_payment_method: String) -> Self {
        Self {
            inventory_repo,
            default_payment_method,
        }
    }

    // --- EMBARQUES ---

    pub async fn create_voyage(
        &self,
        vessel_id: Uuid,
        route_id: Uuid,
        departure_at: DateTime<Utc>,
        price: Decimal,
        seats: Option<i32>,
    ) -> Result<Voyage, AppError> {
        let voyage = self
            .inventory_repo
            .create_voyage(NewVoyage {
                vessel_id,
                route_id,
                departure_at,
                price,
                seats,
            })
            .await?;

        tracing::info!(
            voyage_id = %voyage.id,
            seats = voyage.total_seats,
            "⛴️ Embarque criado"
        );
        Ok(voyage)
    }

    pub async fn get_voyage(&self, voyage_id: Uuid) -> Result<VoyageDetail, AppError> {
        let voyage = self
            .inventory_repo
            .find_voyage(voyage_id)
            .await?
            .ok_or(AppError::VoyageNotFound)?;
        let tickets = self.inventory_repo.list_voyage_tickets(voyage_id).await?;
        Ok(VoyageDetail { voyage, tickets })
    }

    /// Atualização parcial do embarque.
    ///
    /// Um `seats_available` informado sobrescreve o contador sem conferir
    /// as passagens emitidas: é uma correção administrativa e pode quebrar
    /// a igualdade `assentos + passagens ativas == total`. Use com cuidado.
    pub async fn update_voyage(&self, voyage_id: Uuid, changes: VoyageChanges) -> Result<Voyage, AppError> {
        if let Some(seats) = changes.seats_available {
            tracing::warn!(
                voyage_id = %voyage_id,
                seats,
                "Assentos disponíveis sobrescritos manualmente"
            );
        }

        self.inventory_repo
            .update_voyage(voyage_id, changes)
            .await?
            .ok_or(AppError::VoyageNotFound)
    }

    // --- PASSAGENS ---

    /// Emite uma passagem consumindo um assento do embarque.
    ///
    /// `amount_paid` assume o preço do embarque e `payment_method` a forma
    /// de pagamento padrão quando não informados. Falhas: `VoyageNotFound`,
    /// `SoldOut`, `PassengerNotFound`. Nada é repetido automaticamente.
    pub async fn issue_ticket(
        &self,
        voyage_id: Uuid,
        passenger_id: Uuid,
        seat_label: Option<String>,
        amount_paid: Option<Decimal>,
        payment_method: Option<String>,
    ) -> Result<Ticket, AppError> {
        let payment_method = payment_method
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.default_payment_method.clone());

        let ticket = self
            .inventory_repo
            .issue_ticket(NewTicket {
                voyage_id,
                passenger_id,
                seat_label,
                amount_paid,
                payment_method,
            })
            .await?;

        tracing::info!(ticket_id = %ticket.id, voyage_id = %voyage_id, "🎫 Passagem emitida");
        Ok(ticket)
    }

    /// Troca o status de uma passagem. Cancelar devolve o assento uma
    /// única vez; recancelar não mexe no inventário.
    pub async fn set_ticket_status(&self, ticket_id: Uuid, status: &str) -> Result<Ticket, AppError> {
        let status = TicketStatus::parse(status).ok_or(AppError::InvalidStatus)?;

        let change = self.inventory_repo.set_ticket_status(ticket_id, status).await?;

        if change.seat_released {
            tracing::info!(
                ticket_id = %ticket_id,
                voyage_id = %change.ticket.voyage_id,
                "Passagem cancelada, assento devolvido"
            );
        } else {
            tracing::debug!(ticket_id = %ticket_id, from = ?change.previous, to = ?status, "Status da passagem alterado");
        }

        Ok(change.ticket)
    }
}
