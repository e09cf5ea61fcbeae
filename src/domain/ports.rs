use uuid::Uuid;

use super::customer::Customer;
use super::errors::DomainError;
use super::order::Order;
use super::order_line::OrderLine;
use super::pricing::PricingService;
use super::product::{Category, Product};

/// Persistence boundary for orders. `save` runs the aggregate's validation
/// checkpoint before writing and replaces the order's lines and feedback as
/// one atomic unit; deleting an order removes both with it.
pub trait OrderStore: Send + Sync + 'static {
    fn save(&self, order: &Order) -> Result<Order, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError>;
    /// A customer's orders, most recent first.
    fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError>;
    fn find_all(&self) -> Result<Vec<Order>, DomainError>;
    /// Every line ever sold for a product, across all orders.
    fn find_lines_by_product(&self, product_id: Uuid) -> Result<Vec<OrderLine>, DomainError>;
}

pub trait CatalogStore: Send + Sync + 'static {
    fn save_product(&self, product: &Product) -> Result<Product, DomainError>;
    fn find_product(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    fn list_products(&self) -> Result<Vec<Product>, DomainError>;
    fn delete_product(&self, id: Uuid) -> Result<(), DomainError>;
    fn save_category(&self, category: &Category) -> Result<Category, DomainError>;
    fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError>;
    fn list_categories(&self) -> Result<Vec<Category>, DomainError>;
}

pub trait CustomerStore: Send + Sync + 'static {
    fn save(&self, customer: &Customer) -> Result<Customer, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;
}

pub trait PricingStore: Send + Sync + 'static {
    fn save(&self, service: &PricingService) -> Result<PricingService, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<PricingService>, DomainError>;
    fn find_all(&self) -> Result<Vec<PricingService>, DomainError>;
    /// The service new carts start with: the oldest regular service, if any.
    fn find_default(&self) -> Result<Option<PricingService>, DomainError>;
}
