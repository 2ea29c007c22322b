//! Persistence boundary for users.

mod memory;

pub use memory::InMemoryUserRepository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{NewUser, Role, User, UserChanges};

/// Storage for user records. "Not found" is `Ok(None)` / `Ok(false)`; errors are infrastructure
/// failures or a `Conflict` on a duplicate email.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<Option<User>>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Users with `role`, oldest first.
    async fn list_by_role(&self, role: Role) -> AppResult<Vec<User>>;
}
