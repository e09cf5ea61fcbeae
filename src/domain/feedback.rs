use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A remark a customer left on one of their orders.
///
/// Created through [`Order::add_feedback`](super::Order::add_feedback), which
/// checks the author and description before anything is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    id: Uuid,
    customer_id: Uuid,
    description: String,
    submitted_at: DateTime<Utc>,
}

impl Feedback {
    pub(crate) fn new(customer_id: Uuid, description: String, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            description,
            submitted_at,
        }
    }

    pub(crate) fn rehydrate(
        id: Uuid,
        customer_id: Uuid,
        description: String,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_id,
            description,
            submitted_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn customer_id(&self) -> Uuid {
        self.customer_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}
