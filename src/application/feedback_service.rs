use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::domain::ports::OrderStore;
use crate::domain::{DomainError, Feedback};

/// Feedback lives inside the order aggregate; this service is the entry point
/// for leaving and reading it.
pub struct FeedbackService<S> {
    orders: S,
}

impl<S: OrderStore> FeedbackService<S> {
    pub fn new(orders: S) -> Self {
        Self { orders }
    }

    /// Record feedback on an order. The aggregate rejects blank descriptions
    /// and authors other than the customer who placed the order.
    pub fn leave(
        &self,
        order_id: Uuid,
        customer_id: Uuid,
        description: &str,
    ) -> Result<Feedback, DomainError> {
        let mut order = self
            .orders
            .find_by_id(order_id)?
            .ok_or(DomainError::NotFound)?;
        let feedback = order.add_feedback(customer_id, description, Utc::now())?;
        self.orders.save(&order)?;
        info!("feedback {} left on order {order_id}", feedback.id());
        Ok(feedback)
    }

    pub fn for_order(&self, order_id: Uuid) -> Result<Vec<Feedback>, DomainError> {
        let order = self
            .orders
            .find_by_id(order_id)?
            .ok_or(DomainError::NotFound)?;
        Ok(order.feedback().to_vec())
    }

    pub fn has_feedback(&self, order_id: Uuid) -> Result<bool, DomainError> {
        Ok(!self.for_order(order_id)?.is_empty())
    }
}
