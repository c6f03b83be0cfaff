// src/db/inventory_repo.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_constraint, error::AppError},
    db::stores::{releases_seat, InventoryStore, TicketStatusChange},
    models::inventory::{NewTicket, NewVoyage, Ticket, TicketStatus, Voyage, VoyageChanges},
};

const VOYAGE_COLUMNS: &str = "id, vessel_id, route_id, departure_at, price, total_seats, \
     seats_available, status, created_at, updated_at";

const TICKET_COLUMNS: &str = "id, voyage_id, passenger_id, seat_label, amount_paid, \
     payment_method, status, created_at, updated_at";

// Repositório de embarques e passagens. Toda mutação de `seats_available`
// passa por um UPDATE condicional, nunca por ler-e-depois-escrever.
#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for InventoryRepository {
    async fn create_voyage(&self, new_voyage: NewVoyage) -> Result<Voyage, AppError> {
        // Assentos padrão = capacidade da embarcação. Se a embarcação não
        // existir o SELECT não retorna linha nenhuma.
        let voyage = sqlx::query_as::<_, Voyage>(&format!(
            r#"
            INSERT INTO voyages (vessel_id, route_id, departure_at, price, total_seats, seats_available)
            SELECT v.id, $2, $3, $4, COALESCE($5, v.capacity), COALESCE($5, v.capacity)
            FROM vessels v
            WHERE v.id = $1
            RETURNING {VOYAGE_COLUMNS}
            "#
        ))
        .bind(new_voyage.vessel_id)
        .bind(new_voyage.route_id)
        .bind(new_voyage.departure_at)
        .bind(new_voyage.price)
        .bind(new_voyage.seats)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_constraint(e, |constraint| match constraint {
                "voyages_route_id_fkey" => Some(AppError::RouteNotFound),
                _ => None,
            })
        })?;

        voyage.ok_or(AppError::VesselNotFound)
    }

    async fn find_voyage(&self, id: Uuid) -> Result<Option<Voyage>, AppError> {
        let voyage = sqlx::query_as::<_, Voyage>(&format!(
            "SELECT {VOYAGE_COLUMNS} FROM voyages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(voyage)
    }

    async fn list_voyage_tickets(&self, voyage_id: Uuid) -> Result<Vec<Ticket>, AppError> {
        let tickets = sqlx::query_as::<_, Ticket>(&format!(
            "SELECT {TICKET_COLUMNS} FROM tickets WHERE voyage_id = $1 ORDER BY created_at DESC"
        ))
        .bind(voyage_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tickets)
    }

    async fn update_voyage(
        &self,
        id: Uuid,
        changes: VoyageChanges,
    ) -> Result<Option<Voyage>, AppError> {
        let voyage = sqlx::query_as::<_, Voyage>(&format!(
            r#"
            UPDATE voyages
            SET departure_at = COALESCE($2, departure_at),
                price = COALESCE($3, price),
                seats_available = COALESCE($4, seats_available),
                status = COALESCE($5, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {VOYAGE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.departure_at)
        .bind(changes.price)
        .bind(changes.seats_available)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(voyage)
    }

    async fn issue_ticket(&self, new_ticket: NewTicket) -> Result<Ticket, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. Decremento condicional: serializa compradores concorrentes na
        //    linha do embarque. Sem linha afetada => esgotado ou inexistente.
        let claimed: Option<Decimal> = sqlx::query_scalar(
            r#"
            UPDATE voyages
            SET seats_available = seats_available - 1, updated_at = NOW()
            WHERE id = $1 AND seats_available > 0
            RETURNING price
            "#,
        )
        .bind(new_ticket.voyage_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(price) = claimed else {
            let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM voyages WHERE id = $1)")
                .bind(new_ticket.voyage_id)
                .fetch_one(&mut *tx)
                .await?;
            // O drop do `tx` faz o rollback (nada foi alterado mesmo).
            return Err(if exists { AppError::SoldOut } else { AppError::VoyageNotFound });
        };

        // 2. Insere a passagem na mesma transação.
        let ticket = sqlx::query_as::<_, Ticket>(&format!(
            r#"
            INSERT INTO tickets (voyage_id, passenger_id, seat_label, amount_paid, payment_method)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TICKET_COLUMNS}
            "#
        ))
        .bind(new_ticket.voyage_id)
        .bind(new_ticket.passenger_id)
        .bind(&new_ticket.seat_label)
        .bind(new_ticket.amount_paid.unwrap_or(price))
        .bind(&new_ticket.payment_method)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // Se falhar aqui, o decremento acima é desfeito junto.
            map_constraint(e, |constraint| match constraint {
                "tickets_passenger_id_fkey" => Some(AppError::PassengerNotFound),
                _ => None,
            })
        })?;

        tx.commit().await?;
        Ok(ticket)
    }

    async fn set_ticket_status(
        &self,
        ticket_id: Uuid,
        status: TicketStatus,
    ) -> Result<TicketStatusChange, AppError> {
        let mut tx = self.pool.begin().await?;

        // Trava a linha da passagem: dois cancelamentos simultâneos não
        // podem devolver o mesmo assento duas vezes.
        let previous: TicketStatus = sqlx::query_scalar(
            "SELECT status FROM tickets WHERE id = $1 FOR UPDATE",
        )
        .bind(ticket_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::TicketNotFound)?;

        let ticket = sqlx::query_as::<_, Ticket>(&format!(
            r#"
            UPDATE tickets SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {TICKET_COLUMNS}
            "#
        ))
        .bind(ticket_id)
        .bind(status)
        .fetch_one(&mut *tx)
        .await?;

        let seat_released = releases_seat(previous, status);
        if seat_released {
            sqlx::query(
                r#"
                UPDATE voyages
                SET seats_available = seats_available + 1, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(ticket.voyage_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(TicketStatusChange {
            ticket,
            previous,
            seat_released,
        })
    }
}
