//! Database layer: pool, migrations and the PostgreSQL user repository.

mod pool;
mod repositories;

pub use pool::{create_pool, migrate, DbPool};
pub use repositories::PgUserRepository;
