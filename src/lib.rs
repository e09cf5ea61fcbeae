//! Order pricing and lifecycle engine for a table-service restaurant. The
//! domain core is pure and synchronous; the adapters under `infrastructure`
//! persist it to Postgres or keep it in memory. A host application embeds the
//! crate in-process and decides the outer transport.

pub mod application;
pub mod db;
pub mod domain;
pub mod infrastructure;
pub mod schema;

use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use domain::DomainError;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), DomainError> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    Ok(())
}
