//! Application services. Each service is generic over the store traits it
//! needs, so tests can run against the in-memory stores and production wires
//! in the Diesel ones.

pub mod catalog_service;
pub mod customer_service;
pub mod feedback_service;
pub mod order_service;
pub mod pricing_admin;
