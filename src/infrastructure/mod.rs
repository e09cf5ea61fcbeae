//! Store adapters: Diesel/Postgres implementations of the domain's port
//! traits, plus in-memory equivalents for tests and embedded use.

pub mod catalog_store;
pub mod customer_store;
pub mod memory;
pub mod models;
pub mod order_store;
pub mod pricing_store;

use uuid::Uuid;

use crate::domain::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

pub(crate) fn missing_after_save(entity: &str, id: Uuid) -> DomainError {
    DomainError::Internal(format!("{entity} {id} missing after save"))
}
