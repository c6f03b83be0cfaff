// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::UserStore,
    models::auth::{Claims, NewUser, Principal, Role, User},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserStore>,
    jwt_secret: String,
    token_ttl: chrono::Duration,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserStore>,
        jwt_secret: String,
        token_ttl: chrono::Duration,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            user_repo,
            jwt_secret,
            token_ttl,
            bcrypt_cost,
        }
    }

    // Auto-cadastro: o papel é sempre CLIENTE.
    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        phone: Option<String>,
    ) -> Result<(User, String), AppError> {
        let password_hash = self.hash_password(password).await?;

        let user = self
            .user_repo
            .create_user(NewUser {
                name: name.to_owned(),
                email: email.to_owned(),
                password_hash,
                phone,
                role: Role::Cliente,
            })
            .await?;

        tracing::info!("👤 Novo cliente registrado: {}", user.id);
        let token = self.create_token(&user)?;
        Ok((user, token))
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AppError::AccountDisabled);
        }

        if !self.verify_password(password, &user.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&user)?;
        Ok((user, token))
    }

    /// Resolve um bearer token para o principal ativo que ele representa.
    ///
    /// O usuário é relido a cada requisição, então uma desativação vale
    /// imediatamente mesmo para tokens ainda dentro da validade.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        match self.user_repo.find_by_id(token_data.claims.sub).await? {
            Some(user) if user.is_active => Ok(user.principal()),
            _ => Err(AppError::InactivePrincipal),
        }
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        phone: Option<String>,
    ) -> Result<User, AppError> {
        self.user_repo
            .update_profile(id, name, phone)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn change_password(
        &self,
        id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.get_user(id).await?;

        if !self.verify_password(current_password, &user.password_hash).await? {
            return Err(AppError::WrongCurrentPassword);
        }

        let new_hash = self.hash_password(new_password).await?;
        if !self.user_repo.update_password(id, &new_hash).await? {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }

    pub async fn set_user_active(&self, id: Uuid, active: bool) -> Result<User, AppError> {
        let user = self
            .user_repo
            .set_active(id, active)
            .await?
            .ok_or(AppError::UserNotFound)?;
        tracing::info!(user_id = %id, active, "Status de acesso do usuário alterado");
        Ok(user)
    }

    /// Garante que exista um ADMIN com este e-mail. Retorna `true` se criou.
    pub async fn ensure_admin(&self, name: &str, email: &str, password: &str) -> Result<bool, AppError> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Ok(false);
        }

        let password_hash = self.hash_password(password).await?;
        match self
            .user_repo
            .create_user(NewUser {
                name: name.to_owned(),
                email: email.to_owned(),
                password_hash,
                phone: None,
                role: Role::Admin,
            })
            .await
        {
            Ok(_) => Ok(true),
            // Outra instância criou no meio tempo.
            Err(AppError::EmailAlreadyExists) => Ok(false),
            Err(e) => Err(e),
        }
    }

    // O bcrypt é CPU-bound: roda fora do executor assíncrono.
    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || hash(&password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, AppError> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        let is_valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
        Ok(is_valid)
    }

    fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
