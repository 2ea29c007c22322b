//! User records as stored and as returned to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

/// Stored user. Holds the password hash, so it is never serialized directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub role: Role,
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.name.is_none()
            && self.password_hash.is_none()
            && self.role.is_none()
    }

    /// Apply the changes to `user`, bumping `updated_at`.
    pub fn apply(self, user: &mut User, now: DateTime<Utc>) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(name) = self.name {
            user.name = Some(name);
        }
        if let Some(password_hash) = self.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        user.updated_at = now;
    }
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Lower-cased, trimmed email used for storage and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            name: None,
            password_hash: "$argon2id$fake".to_string(),
            role: Role::Employee,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn response_omits_password_hash() {
        let json = serde_json::to_value(UserResponse::from(sample())).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "EMPLOYEE");
    }

    #[test]
    fn apply_keeps_untouched_fields() {
        let mut user = sample();
        let before = user.clone();
        let later = before.updated_at + chrono::Duration::seconds(5);
        UserChanges {
            role: Some(Role::Manager),
            ..Default::default()
        }
        .apply(&mut user, later);

        assert_eq!(user.role, Role::Manager);
        assert_eq!(user.email, before.email);
        assert_eq!(user.password_hash, before.password_hash);
        assert_eq!(user.updated_at, later);
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }
}
