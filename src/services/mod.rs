//! Business logic: user records.

pub mod user;

pub use user::{CreateUser, UpdateUser, UserService};
