//! In-memory user store, used when no database is configured and in tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UserRepository;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, Role, User, UserChanges};

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn email_taken(users: &HashMap<Uuid, User>, email: &str, except: Option<Uuid>) -> bool {
    users
        .values()
        .any(|u| u.email == email && Some(u.id) != except)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if email_taken(&users, &user.email, None) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        if !users.contains_key(&id) {
            return Ok(None);
        }
        if let Some(email) = &changes.email {
            if email_taken(&users, email, Some(id)) {
                return Err(AppError::Conflict("Email already registered".to_string()));
            }
        }
        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply(user, Utc::now());
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn list_by_role(&self, role: Role) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users.values().filter(|u| u.role == role).cloned().collect();
        matching.sort_by_key(|u| (u.created_at, u.id));
        Ok(matching)
    }
}
