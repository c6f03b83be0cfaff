// src/db/passenger_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_constraint, error::AppError},
    db::stores::PassengerStore,
    models::passenger::{NewPassenger, Passenger, PassengerChanges},
};

const PASSENGER_COLUMNS: &str = "id, name, tax_id, phone, email, created_at, updated_at";

#[derive(Clone)]
pub struct PassengerRepository {
    pool: PgPool,
}

impl PassengerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PassengerStore for PassengerRepository {
    // A unicidade do CPF fica com a constraint, não com um SELECT prévio.
    async fn create_passenger(&self, new_passenger: NewPassenger) -> Result<Passenger, AppError> {
        sqlx::query_as::<_, Passenger>(&format!(
            r#"
            INSERT INTO passengers (name, tax_id, phone, email)
            VALUES ($1, $2, $3, $4)
            RETURNING {PASSENGER_COLUMNS}
            "#
        ))
        .bind(&new_passenger.name)
        .bind(&new_passenger.tax_id)
        .bind(&new_passenger.phone)
        .bind(&new_passenger.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint(e, |constraint| match constraint {
                "passengers_tax_id_key" => Some(AppError::TaxIdAlreadyExists),
                _ => None,
            })
        })
    }

    async fn update_passenger(
        &self,
        id: Uuid,
        changes: PassengerChanges,
    ) -> Result<Option<Passenger>, AppError> {
        let passenger = sqlx::query_as::<_, Passenger>(&format!(
            r#"
            UPDATE passengers
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PASSENGER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.phone)
        .bind(changes.email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(passenger)
    }
}
