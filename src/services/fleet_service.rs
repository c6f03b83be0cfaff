// src/services/fleet_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::stores::FleetStore,
    models::fleet::{NewRoute, NewVessel, Route, Vessel},
};

#[derive(Clone)]
pub struct FleetService {
    fleet_repo: Arc<dyn FleetStore>,
}

impl FleetService {
    pub fn new(fleet_repo: Arc<dyn FleetStore>) -> Self {
        Self { fleet_repo }
    }

    pub async fn create_vessel(
        &self,
        name: &str,
        capacity: i32,
        description: Option<String>,
    ) -> Result<Vessel, AppError> {
        self.fleet_repo
            .create_vessel(NewVessel {
                name: name.trim().to_owned(),
                capacity,
                description,
            })
            .await
    }

    pub async fn create_route(
        &self,
        origin: &str,
        destination: &str,
        duration: Option<String>,
        distance: Option<String>,
    ) -> Result<Route, AppError> {
        self.fleet_repo
            .create_route(NewRoute {
                origin: origin.trim().to_owned(),
                destination: destination.trim().to_owned(),
                duration,
                distance,
            })
            .await
    }
}
