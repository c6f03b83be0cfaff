// src/db/memory.rs
//
// Persistência em memória para os testes. Cada unidade de trabalho roda
// inteira sob um único `Mutex`, o que dá a mesma garantia de
// tudo-ou-nada das transações do Postgres.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::{
        releases_seat, FleetStore, InventoryStore, PassengerStore, TicketStatusChange, UserStore,
    },
    models::{
        auth::{NewUser, User},
        fleet::{NewRoute, NewVessel, Route, Vessel},
        inventory::{NewTicket, NewVoyage, Ticket, TicketStatus, Voyage, VoyageChanges, VoyageStatus},
        passenger::{NewPassenger, Passenger, PassengerChanges},
    },
};

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    vessels: HashMap<Uuid, Vessel>,
    routes: HashMap<Uuid, Route>,
    voyages: HashMap<Uuid, Voyage>,
    tickets: HashMap<Uuid, Ticket>,
    passengers: HashMap<Uuid, Passenger>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, AppError> {
        self.state
            .lock()
            .map_err(|_| anyhow::anyhow!("estado em memória envenenado").into())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let state = self.lock()?;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut state = self.lock()?;
        if state.users.values().any(|u| u.email == new_user.email) {
            return Err(AppError::EmailAlreadyExists);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            phone: new_user.phone,
            role: new_user.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        phone: Option<String>,
    ) -> Result<Option<User>, AppError> {
        let mut state = self.lock()?;
        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = name {
            user.name = name;
        }
        if phone.is_some() {
            user.phone = phone;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, AppError> {
        let mut state = self.lock()?;
        match state.users.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<Option<User>, AppError> {
        let mut state = self.lock()?;
        Ok(state.users.get_mut(&id).map(|user| {
            user.is_active = active;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn create_voyage(&self, new_voyage: NewVoyage) -> Result<Voyage, AppError> {
        let mut state = self.lock()?;
        let capacity = state
            .vessels
            .get(&new_voyage.vessel_id)
            .map(|v| v.capacity)
            .ok_or(AppError::VesselNotFound)?;
        if !state.routes.contains_key(&new_voyage.route_id) {
            return Err(AppError::RouteNotFound);
        }
        let seats = new_voyage.seats.unwrap_or(capacity);
        let now = Utc::now();
        let voyage = Voyage {
            id: Uuid::new_v4(),
            vessel_id: new_voyage.vessel_id,
            route_id: new_voyage.route_id,
            departure_at: new_voyage.departure_at,
            price: new_voyage.price,
            total_seats: seats,
            seats_available: seats,
            status: VoyageStatus::Scheduled,
            created_at: now,
            updated_at: now,
        };
        state.voyages.insert(voyage.id, voyage.clone());
        Ok(voyage)
    }

    async fn find_voyage(&self, id: Uuid) -> Result<Option<Voyage>, AppError> {
        Ok(self.lock()?.voyages.get(&id).cloned())
    }

    async fn list_voyage_tickets(&self, voyage_id: Uuid) -> Result<Vec<Ticket>, AppError> {
        let state = self.lock()?;
        let mut tickets: Vec<Ticket> = state
            .tickets
            .values()
            .filter(|t| t.voyage_id == voyage_id)
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tickets)
    }

    async fn update_voyage(
        &self,
        id: Uuid,
        changes: VoyageChanges,
    ) -> Result<Option<Voyage>, AppError> {
        let mut state = self.lock()?;
        let Some(voyage) = state.voyages.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(departure_at) = changes.departure_at {
            voyage.departure_at = departure_at;
        }
        if let Some(price) = changes.price {
            voyage.price = price;
        }
        if let Some(seats) = changes.seats_available {
            voyage.seats_available = seats;
        }
        if let Some(status) = changes.status {
            voyage.status = status;
        }
        voyage.updated_at = Utc::now();
        Ok(Some(voyage.clone()))
    }

    async fn issue_ticket(&self, new_ticket: NewTicket) -> Result<Ticket, AppError> {
        let mut state = self.lock()?;

        let voyage = state
            .voyages
            .get(&new_ticket.voyage_id)
            .ok_or(AppError::VoyageNotFound)?;
        if voyage.seats_available <= 0 {
            return Err(AppError::SoldOut);
        }
        let price = voyage.price;
        if !state.passengers.contains_key(&new_ticket.passenger_id) {
            return Err(AppError::PassengerNotFound);
        }

        let now = Utc::now();
        let ticket = Ticket {
            id: Uuid::new_v4(),
            voyage_id: new_ticket.voyage_id,
            passenger_id: new_ticket.passenger_id,
            seat_label: new_ticket.seat_label,
            amount_paid: new_ticket.amount_paid.unwrap_or(price),
            payment_method: new_ticket.payment_method,
            status: TicketStatus::Confirmed,
            created_at: now,
            updated_at: now,
        };

        if let Some(voyage) = state.voyages.get_mut(&ticket.voyage_id) {
            voyage.seats_available -= 1;
            voyage.updated_at = now;
        }
        state.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn set_ticket_status(
        &self,
        ticket_id: Uuid,
        status: TicketStatus,
    ) -> Result<TicketStatusChange, AppError> {
        let mut state = self.lock()?;
        let now = Utc::now();

        let ticket = state
            .tickets
            .get_mut(&ticket_id)
            .ok_or(AppError::TicketNotFound)?;
        let previous = ticket.status;
        ticket.status = status;
        ticket.updated_at = now;
        let ticket = ticket.clone();

        let seat_released = releases_seat(previous, status);
        if seat_released {
            if let Some(voyage) = state.voyages.get_mut(&ticket.voyage_id) {
                voyage.seats_available += 1;
                voyage.updated_at = now;
            }
        }

        Ok(TicketStatusChange {
            ticket,
            previous,
            seat_released,
        })
    }
}

#[async_trait]
impl FleetStore for MemoryStore {
    async fn create_vessel(&self, new_vessel: NewVessel) -> Result<Vessel, AppError> {
        let vessel = Vessel {
            id: Uuid::new_v4(),
            name: new_vessel.name,
            capacity: new_vessel.capacity,
            description: new_vessel.description,
            is_active: true,
            created_at: Utc::now(),
        };
        self.lock()?.vessels.insert(vessel.id, vessel.clone());
        Ok(vessel)
    }

    async fn create_route(&self, new_route: NewRoute) -> Result<Route, AppError> {
        let route = Route {
            id: Uuid::new_v4(),
            origin: new_route.origin,
            destination: new_route.destination,
            duration: new_route.duration,
            distance: new_route.distance,
            is_active: true,
            created_at: Utc::now(),
        };
        self.lock()?.routes.insert(route.id, route.clone());
        Ok(route)
    }
}

#[async_trait]
impl PassengerStore for MemoryStore {
    async fn create_passenger(&self, new_passenger: NewPassenger) -> Result<Passenger, AppError> {
        let mut state = self.lock()?;
        if state.passengers.values().any(|p| p.tax_id == new_passenger.tax_id) {
            return Err(AppError::TaxIdAlreadyExists);
        }
        let now = Utc::now();
        let passenger = Passenger {
            id: Uuid::new_v4(),
            name: new_passenger.name,
            tax_id: new_passenger.tax_id,
            phone: new_passenger.phone,
            email: new_passenger.email,
            created_at: now,
            updated_at: now,
        };
        state.passengers.insert(passenger.id, passenger.clone());
        Ok(passenger)
    }

    async fn update_passenger(
        &self,
        id: Uuid,
        changes: PassengerChanges,
    ) -> Result<Option<Passenger>, AppError> {
        let mut state = self.lock()?;
        let Some(passenger) = state.passengers.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            passenger.name = name;
        }
        if changes.phone.is_some() {
            passenger.phone = changes.phone;
        }
        if changes.email.is_some() {
            passenger.email = changes.email;
        }
        passenger.updated_at = Utc::now();
        Ok(Some(passenger.clone()))
    }
}
