//! User service: the operations behind the user endpoints.

use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::AuthAppService;
use crate::error::{AppError, AppResult};
use crate::models::{normalize_email, NewUser, Role, User, UserChanges};
use crate::repositories::UserRepository;

/// Input for `create_user`; the password is still plain text.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub name: Option<String>,
    pub password: String,
    pub role: Role,
}

/// Input for `update_user`. `None` fields are left as stored.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, input), fields(email = %input.email, role = %input.role))]
    pub async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let password_hash = AuthAppService::hash_password_blocking(input.password).await?;
        let user = self
            .repo
            .insert(NewUser {
                email: normalize_email(&input.email),
                name: input.name,
                password_hash,
                role: input.role,
            })
            .await?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn get_user_by_id(&self, id: Uuid) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(AppError::user_not_found)
    }

    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.repo.find_by_email(&normalize_email(email)).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<User> {
        // Unknown ids are 404 before any hashing or conflict check.
        let current = self.get_user_by_id(id).await?;

        let password_hash = match input.password {
            Some(password) => Some(AuthAppService::hash_password_blocking(password).await?),
            None => None,
        };
        let changes = UserChanges {
            email: input.email.as_deref().map(normalize_email),
            name: input.name,
            password_hash,
            role: input.role,
        };
        if changes.is_empty() {
            return Ok(current);
        }

        let user = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(AppError::user_not_found)?;
        info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::user_not_found());
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    pub async fn get_users_by_role(&self, role: Role) -> AppResult<Vec<User>> {
        self.repo.list_by_role(role).await
    }
}
