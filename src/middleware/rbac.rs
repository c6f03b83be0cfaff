// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    middleware::auth::AuthenticatedUser,
    models::auth::{Principal, Role},
};

/// O que uma rota exige do principal.
#[derive(Debug, Clone, Copy)]
pub enum RoleRequirement {
    /// Papel exato: o principal precisa ter um dos papéis listados.
    AnyOf(&'static [Role]),
    /// Nível mínimo na hierarquia ADMIN > OPERADOR > CLIENTE.
    AtLeast(Role),
}

pub fn authorize(principal: Option<&Principal>, requirement: &RoleRequirement) -> Result<(), AppError> {
    let principal = principal.ok_or(AppError::Unauthenticated)?;

    match requirement {
        RoleRequirement::AnyOf(roles) => {
            if roles.contains(&principal.role) {
                return Ok(());
            }
            let names: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
            Err(AppError::Forbidden(format!(
                "Requer uma das seguintes roles: {}",
                names.join(", ")
            )))
        }
        RoleRequirement::AtLeast(minimum) => {
            if principal.role.level() >= minimum.level() {
                return Ok(());
            }
            Err(AppError::Forbidden(format!("Requer nível mínimo: {}", minimum)))
        }
    }
}

/// 1. O Trait que define a exigência de papel de uma rota
pub trait RoleGate: Send + Sync + 'static {
    fn requirement() -> RoleRequirement;
}

/// 2. O Extractor (Guardião)
pub struct RequireRole<G>(pub PhantomData<G>);

// 3. Implementação do FromRequestParts
impl<G, S> FromRequestParts<S> for RequireRole<G>
where
    G: RoleGate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts.extensions.get::<AuthenticatedUser>().map(|u| &u.0);
        authorize(principal, &G::requirement())?;
        Ok(RequireRole(PhantomData))
    }
}

// --- Gates usados pelas rotas ---

pub struct OperatorOrAbove;
impl RoleGate for OperatorOrAbove {
    fn requirement() -> RoleRequirement {
        RoleRequirement::AtLeast(Role::Operador)
    }
}

pub struct AdminOnly;
impl RoleGate for AdminOnly {
    fn requirement() -> RoleRequirement {
        RoleRequirement::AnyOf(&[Role::Admin])
    }
}
