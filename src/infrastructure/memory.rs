//! In-memory store implementations backed by shared maps. Cloning a store
//! hands out another handle onto the same state, so one instance can be
//! shared between several services in tests and embedded setups.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::domain::ports::{CatalogStore, CustomerStore, OrderStore, PricingStore};
use crate::domain::{
    Category, Customer, DomainError, Order, OrderLine, PricingPolicy, PricingService, Product,
};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, DomainError> {
    mutex
        .lock()
        .map_err(|_| DomainError::Internal("store mutex poisoned".to_string()))
}

#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<Mutex<HashMap<Uuid, Order>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn save(&self, order: &Order) -> Result<Order, DomainError> {
        order.validate()?;
        lock(&self.orders)?.insert(order.id(), order.clone());
        Ok(order.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(lock(&self.orders)?.get(&id).cloned())
    }

    fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        lock(&self.orders)?
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::NotFound)
    }

    fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let mut orders: Vec<Order> = lock(&self.orders)?
            .values()
            .filter(|o| o.customer_id() == customer_id)
            .cloned()
            .collect();
        orders.sort_by_key(|o| Reverse(o.order_time()));
        Ok(orders)
    }

    fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        let mut orders: Vec<Order> = lock(&self.orders)?.values().cloned().collect();
        orders.sort_by_key(|o| Reverse(o.order_time()));
        Ok(orders)
    }

    fn find_lines_by_product(&self, product_id: Uuid) -> Result<Vec<OrderLine>, DomainError> {
        Ok(lock(&self.orders)?
            .values()
            .flat_map(|o| o.lines())
            .filter(|l| l.product_id() == product_id)
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    products: Arc<Mutex<HashMap<Uuid, Product>>>,
    categories: Arc<Mutex<HashMap<Uuid, Category>>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn save_product(&self, product: &Product) -> Result<Product, DomainError> {
        lock(&self.products)?.insert(product.id(), product.clone());
        Ok(product.clone())
    }

    fn find_product(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        Ok(lock(&self.products)?.get(&id).cloned())
    }

    fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        let mut products: Vec<Product> = lock(&self.products)?.values().cloned().collect();
        products.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(products)
    }

    fn delete_product(&self, id: Uuid) -> Result<(), DomainError> {
        lock(&self.products)?
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::NotFound)
    }

    fn save_category(&self, category: &Category) -> Result<Category, DomainError> {
        lock(&self.categories)?.insert(category.id(), category.clone());
        Ok(category.clone())
    }

    fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        Ok(lock(&self.categories)?.get(&id).cloned())
    }

    fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let mut categories: Vec<Category> = lock(&self.categories)?.values().cloned().collect();
        categories.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(categories)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCustomerStore {
    customers: Arc<Mutex<HashMap<Uuid, Customer>>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomerStore for InMemoryCustomerStore {
    fn save(&self, customer: &Customer) -> Result<Customer, DomainError> {
        lock(&self.customers)?.insert(customer.id(), customer.clone());
        Ok(customer.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        Ok(lock(&self.customers)?.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        Ok(lock(&self.customers)?
            .values()
            .find(|c| c.email() == email)
            .cloned())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryPricingStore {
    services: Arc<Mutex<HashMap<Uuid, PricingService>>>,
}

impl InMemoryPricingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PricingStore for InMemoryPricingStore {
    fn save(&self, service: &PricingService) -> Result<PricingService, DomainError> {
        lock(&self.services)?.insert(service.id(), service.clone());
        Ok(service.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<PricingService>, DomainError> {
        Ok(lock(&self.services)?.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<PricingService>, DomainError> {
        let mut services: Vec<PricingService> = lock(&self.services)?.values().cloned().collect();
        services.sort_by_key(|s| s.created_at());
        Ok(services)
    }

    fn find_default(&self) -> Result<Option<PricingService>, DomainError> {
        Ok(lock(&self.services)?
            .values()
            .filter(|s| matches!(s.policy(), PricingPolicy::Regular))
            .min_by_key(|s| s.created_at())
            .cloned())
    }
}
