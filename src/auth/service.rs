//! Auth application service: password hashing and credential checks.

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::services::UserService;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{debug, info, instrument};

pub struct AuthAppService;

impl AuthAppService {
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("hash: {}", e)))?
            .to_string();
        Ok(hash)
    }

    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| AppError::Internal(anyhow::anyhow!("parse hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// `hash_password` on the blocking pool.
    pub async fn hash_password_blocking(password: String) -> AppResult<String> {
        tokio::task::spawn_blocking(move || Self::hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("hash task: {}", e)))?
    }

    /// `verify_password` on the blocking pool.
    pub async fn verify_password_blocking(password: String, hash: String) -> AppResult<bool> {
        tokio::task::spawn_blocking(move || Self::verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("verify task: {}", e)))?
    }

    /// Look up `email` and check `password`. Unknown email and wrong password fail the same way.
    #[instrument(skip(users, password))]
    pub async fn authenticate(users: &UserService, email: &str, password: &str) -> AppResult<User> {
        let Some(user) = users.get_user_by_email(email).await? else {
            info!("login rejected: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        debug!(user_id = %user.id, "verifying password");
        let matches =
            Self::verify_password_blocking(password.to_string(), user.password_hash.clone()).await?;
        if !matches {
            info!(user_id = %user.id, "login rejected: password mismatch");
            return Err(AppError::InvalidCredentials);
        }
        Ok(user)
    }
}
