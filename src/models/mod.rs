//! Data models: users and roles.

pub mod role;
pub mod user;

pub use role::*;
pub use user::*;
