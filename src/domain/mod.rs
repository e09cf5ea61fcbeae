//! Pure domain model: aggregates, value types, and the storage ports.
//!
//! Nothing in here performs I/O or logging; services in
//! [`crate::application`] orchestrate these types through the port traits.

pub mod money;
pub mod ports;

mod customer;
mod errors;
mod feedback;
mod order;
mod order_line;
mod pricing;
mod product;

pub use customer::{Address, Customer};
pub use errors::{DomainError, ValidationFailure};
pub use feedback::Feedback;
pub use order::{Order, OrderStatus, PaymentStatus};
pub(crate) use order::OrderRecord;
pub use order_line::OrderLine;
pub use pricing::{PricingPolicy, PricingService};
pub use product::{Category, IceCreamFlavor, Image, ImageFormat, Product, ProductKind};

pub(crate) fn non_blank(value: &str, field: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidArgument(format!(
            "{field} must not be blank"
        )));
    }
    Ok(())
}

pub(crate) fn non_blank_opt(value: Option<&str>, field: &str) -> Result<(), DomainError> {
    match value {
        Some(v) => non_blank(v, field),
        None => Ok(()),
    }
}
