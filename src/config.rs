// src/config.rs

use std::{env, sync::Arc};

use anyhow::Context;
use sqlx::PgPool;

use crate::{
    db::{FleetRepository, InventoryRepository, PassengerRepository, UserRepository},
    services::{auth::AuthService, FleetService, InventoryService, PassengerService},
};

// Dados do ADMIN garantido na inicialização
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub jwt_expiration_hours: i64,
    pub bcrypt_cost: u32,
    pub default_payment_method: String,
    pub admin: Option<AdminBootstrap>,
}

impl Config {
    /// Carrega a configuração do ambiente (e do `.env`, se existir).
    pub fn from_env() -> anyhow::Result<Self> {
        // O .env é opcional: em produção as variáveis vêm do ambiente.
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminBootstrap {
                    name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrador".into()),
                    email,
                    password,
                })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            port: parse_var("PORT", 3001)?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            jwt_expiration_hours: parse_var("JWT_EXPIRATION_HOURS", 168)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            default_payment_method: env::var("DEFAULT_PAYMENT_METHOD").unwrap_or_else(|_| "PIX".into()),
            admin,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} inválida: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

// Custo mínimo aceito pelo bcrypt; deixa os testes rápidos.
#[cfg(test)]
pub const TEST_BCRYPT_COST: u32 = 4;

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub inventory_service: InventoryService,
    pub fleet_service: FleetService,
    pub passenger_service: PassengerService,
}

impl AppState {
    // --- Monta o gráfico de dependências sobre o Postgres ---
    pub fn from_pool(db_pool: PgPool, config: &Config) -> Self {
        let auth_service = AuthService::new(
            Arc::new(UserRepository::new(db_pool.clone())),
            config.jwt_secret.clone(),
            chrono::Duration::hours(config.jwt_expiration_hours),
            config.bcrypt_cost,
        );
        let inventory_service = InventoryService::new(
            Arc::new(InventoryRepository::new(db_pool.clone())),
            config.default_payment_method.clone(),
        );
        let fleet_service = FleetService::new(Arc::new(FleetRepository::new(db_pool.clone())));
        let passenger_service = PassengerService::new(Arc::new(PassengerRepository::new(db_pool)));

        Self {
            auth_service,
            inventory_service,
            fleet_service,
            passenger_service,
        }
    }

    // Mesmo gráfico, todo sobre um único store em memória.
    #[cfg(test)]
    pub fn in_memory(store: Arc<crate::db::memory::MemoryStore>, jwt_secret: &str) -> Self {
        Self {
            auth_service: AuthService::new(
                store.clone(),
                jwt_secret.to_owned(),
                chrono::Duration::hours(1),
                TEST_BCRYPT_COST,
            ),
            inventory_service: InventoryService::new(store.clone(), "PIX".into()),
            fleet_service: FleetService::new(store.clone()),
            passenger_service: PassengerService::new(store),
        }
    }
}
