//! Closed set of user roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role attached to every user; also the filter for role listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Manager,
    Supervisor,
    Hr,
    Secretary,
    Employee,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Manager,
        Role::Supervisor,
        Role::Hr,
        Role::Secretary,
        Role::Employee,
    ];

    /// Stored and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "MANAGER",
            Role::Supervisor => "SUPERVISOR",
            Role::Hr => "HR",
            Role::Secretary => "SECRETARY",
            Role::Employee => "EMPLOYEE",
        }
    }

    /// Path segment of the listing route, e.g. `/users/role/managers`.
    pub fn listing_segment(&self) -> &'static str {
        match self {
            Role::Manager => "managers",
            Role::Supervisor => "supervisors",
            Role::Hr => "hr",
            Role::Secretary => "secretaries",
            Role::Employee => "employees",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
