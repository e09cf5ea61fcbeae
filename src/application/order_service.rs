use chrono::Utc;
use log::{debug, info};
use uuid::Uuid;

use crate::domain::ports::{CustomerStore, OrderStore, PricingStore};
use crate::domain::{DomainError, Order, OrderLine, OrderStatus, PaymentStatus};

/// Order lifecycle orchestration. Every mutating call is one load, one
/// aggregate operation, one save; the store underneath is expected to make
/// each save atomic.
pub struct OrderService<S, C, P> {
    orders: S,
    customers: C,
    pricing: P,
}

impl<S: OrderStore, C: CustomerStore, P: PricingStore> OrderService<S, C, P> {
    pub fn new(orders: S, customers: C, pricing: P) -> Self {
        Self {
            orders,
            customers,
            pricing,
        }
    }

    /// Open a transient cart for a known customer, priced by the default
    /// service. Nothing is persisted until [`OrderService::submit`].
    pub fn start_cart(&self, customer_id: Uuid) -> Result<Order, DomainError> {
        let customer = self
            .customers
            .find_by_id(customer_id)?
            .ok_or(DomainError::NotFound)?;
        let pricing = self.pricing.find_default()?.ok_or_else(|| {
            DomainError::IllegalState("no default pricing service is configured".to_string())
        })?;
        let order = Order::new(customer.id(), Utc::now(), pricing)?;
        debug!("started cart {} for customer {}", order.id(), customer.id());
        Ok(order)
    }

    /// Fix the table and notes on a cart and write it for the kitchen.
    pub fn submit(
        &self,
        cart: &mut Order,
        table_number: i32,
        notes: Option<String>,
    ) -> Result<Order, DomainError> {
        cart.set_table_number(table_number)?;
        cart.set_notes(notes);
        let saved = self.orders.save(cart)?;
        info!("order {} submitted for table {table_number}", saved.id());
        Ok(saved)
    }

    pub fn find(&self, id: Uuid) -> Result<Order, DomainError> {
        self.load(id)
    }

    pub fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError> {
        self.orders.find_by_customer(customer_id)
    }

    pub fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        self.orders.find_all()
    }

    pub fn cancel(&self, id: Uuid) -> Result<Order, DomainError> {
        let mut order = self.load(id)?;
        order.cancel()?;
        let saved = self.orders.save(&order)?;
        info!("order {id} canceled");
        Ok(saved)
    }

    pub fn reactivate(&self, id: Uuid) -> Result<Order, DomainError> {
        let mut order = self.load(id)?;
        order.reactivate();
        let saved = self.orders.save(&order)?;
        info!("order {id} is now {}", saved.status());
        Ok(saved)
    }

    pub fn pay(&self, id: Uuid, payment: PaymentStatus) -> Result<Order, DomainError> {
        let mut order = self.load(id)?;
        order.pay(payment)?;
        let saved = self.orders.save(&order)?;
        info!(
            "order {id} payment set to {payment}, status {}",
            saved.status()
        );
        Ok(saved)
    }

    /// Employee dashboard edit. Tokens are parsed before anything is loaded,
    /// so a bad token leaves the order untouched.
    pub fn update_status_and_payment(
        &self,
        id: Uuid,
        status_token: &str,
        payment_token: &str,
    ) -> Result<Order, DomainError> {
        let status: OrderStatus = status_token.parse()?;
        let payment: PaymentStatus = payment_token.parse()?;
        let mut order = self.load(id)?;
        order.update_status_and_payment(status, payment);
        let saved = self.orders.save(&order)?;
        info!(
            "order {id} moved to {}/{}",
            saved.status(),
            saved.payment_status()
        );
        Ok(saved)
    }

    /// Hard delete, restricted to orders still in NEW.
    pub fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let order = self.load(id)?;
        if order.status() != OrderStatus::New {
            return Err(DomainError::IllegalState(format!(
                "only NEW orders can be deleted, this one is {}",
                order.status()
            )));
        }
        self.orders.delete_by_id(id)?;
        info!("order {id} deleted");
        Ok(())
    }

    /// Every line ever sold for a product, for reporting.
    pub fn order_history_for_product(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<OrderLine>, DomainError> {
        self.orders.find_lines_by_product(product_id)
    }

    fn load(&self, id: Uuid) -> Result<Order, DomainError> {
        self.orders.find_by_id(id)?.ok_or(DomainError::NotFound)
    }
}
