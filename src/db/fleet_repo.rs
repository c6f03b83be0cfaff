// src/db/fleet_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::stores::FleetStore,
    models::fleet::{NewRoute, NewVessel, Route, Vessel},
};

// Embarcações e rotas: cadastros simples, sem regras de inventário.
#[derive(Clone)]
pub struct FleetRepository {
    pool: PgPool,
}

impl FleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FleetStore for FleetRepository {
    async fn create_vessel(&self, new_vessel: NewVessel) -> Result<Vessel, AppError> {
        let vessel = sqlx::query_as::<_, Vessel>(
            r#"
            INSERT INTO vessels (name, capacity, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, capacity, description, is_active, created_at
            "#,
        )
        .bind(&new_vessel.name)
        .bind(new_vessel.capacity)
        .bind(&new_vessel.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(vessel)
    }

    async fn create_route(&self, new_route: NewRoute) -> Result<Route, AppError> {
        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (origin, destination, duration, distance)
            VALUES ($1, $2, $3, $4)
            RETURNING id, origin, destination, duration, distance, is_active, created_at
            "#,
        )
        .bind(&new_route.origin)
        .bind(&new_route.destination)
        .bind(&new_route.duration)
        .bind(&new_route.distance)
        .fetch_one(&self.pool)
        .await?;
        Ok(route)
    }
}
