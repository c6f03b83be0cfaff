// src/services/passenger_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::PassengerStore,
    models::passenger::{NewPassenger, Passenger, PassengerChanges},
};

#[derive(Clone)]
pub struct PassengerService {
    passenger_repo: Arc<dyn PassengerStore>,
}

impl PassengerService {
    pub fn new(passenger_repo: Arc<dyn PassengerStore>) -> Self {
        Self { passenger_repo }
    }

    // O CPF é gravado sem espaços nas pontas para a unicidade valer.
    pub async fn create_passenger(
        &self,
        name: &str,
        tax_id: &str,
        phone: Option<String>,
        email: Option<String>,
    ) -> Result<Passenger, AppError> {
        self.passenger_repo
            .create_passenger(NewPassenger {
                name: name.trim().to_owned(),
                tax_id: tax_id.trim().to_owned(),
                phone,
                email,
            })
            .await
    }

    pub async fn update_passenger(
        &self,
        id: Uuid,
        changes: PassengerChanges,
    ) -> Result<Passenger, AppError> {
        self.passenger_repo
            .update_passenger(id, changes)
            .await?
            .ok_or(AppError::PassengerNotFound)
    }
}
