// src/db/stores.rs
//
// Contratos de persistência consumidos pelos serviços. A implementação de
// produção usa o Postgres (repositórios `*_repo`); os testes usam o
// `MemoryStore`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::{NewUser, User},
        fleet::{NewRoute, NewVessel, Route, Vessel},
        inventory::{NewTicket, NewVoyage, Ticket, TicketStatus, Voyage, VoyageChanges},
        passenger::{NewPassenger, Passenger, PassengerChanges},
    },
};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// `EmailAlreadyExists` se o e-mail já estiver cadastrado.
    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        phone: Option<String>,
    ) -> Result<Option<User>, AppError>;

    /// Retorna `false` se o usuário não existir.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, AppError>;

    async fn set_active(&self, id: Uuid, active: bool) -> Result<Option<User>, AppError>;
}

/// Resultado de uma troca de status de passagem.
#[derive(Debug, Clone)]
pub struct TicketStatusChange {
    pub ticket: Ticket,
    pub previous: TicketStatus,
    pub seat_released: bool,
}

/// Decide, dentro da unidade de trabalho, se a troca devolve um assento.
/// Só CANCELLED vindo de um status que ocupava assento devolve.
pub fn releases_seat(previous: TicketStatus, next: TicketStatus) -> bool {
    next == TicketStatus::Cancelled && previous.holds_seat()
}

#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Falha com `VesselNotFound` / `RouteNotFound` se as referências não existirem.
    async fn create_voyage(&self, new_voyage: NewVoyage) -> Result<Voyage, AppError>;

    async fn find_voyage(&self, id: Uuid) -> Result<Option<Voyage>, AppError>;

    async fn list_voyage_tickets(&self, voyage_id: Uuid) -> Result<Vec<Ticket>, AppError>;

    async fn update_voyage(&self, id: Uuid, changes: VoyageChanges) -> Result<Option<Voyage>, AppError>;

    /// Unidade de trabalho atômica: decrementa `seats_available` somente se
    /// ainda houver assento e insere a passagem. Falha com `VoyageNotFound`,
    /// `SoldOut` ou `PassengerNotFound` sem deixar mutação parcial.
    async fn issue_ticket(&self, new_ticket: NewTicket) -> Result<Ticket, AppError>;

    /// Unidade de trabalho atômica: troca o status e, quando
    /// [`releases_seat`] permitir, devolve o assento ao embarque.
    async fn set_ticket_status(
        &self,
        ticket_id: Uuid,
        status: TicketStatus,
    ) -> Result<TicketStatusChange, AppError>;
}

#[async_trait]
pub trait FleetStore: Send + Sync {
    async fn create_vessel(&self, new_vessel: NewVessel) -> Result<Vessel, AppError>;

    async fn create_route(&self, new_route: NewRoute) -> Result<Route, AppError>;
}

#[async_trait]
pub trait PassengerStore: Send + Sync {
    /// `TaxIdAlreadyExists` se o CPF já estiver cadastrado.
    async fn create_passenger(&self, new_passenger: NewPassenger) -> Result<Passenger, AppError>;

    async fn update_passenger(
        &self,
        id: Uuid,
        changes: PassengerChanges,
    ) -> Result<Option<Passenger>, AppError>;
}
