use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::errors::DomainError;
use super::money;

/// A priced quantity of one product on an order.
///
/// Lines are created and mutated only through [`Order`](super::Order), which
/// owns the collection and enforces the lifecycle rules. The unit price is
/// captured from the catalog when the line is added and never follows later
/// catalog price changes.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    id: Uuid,
    product_id: Uuid,
    quantity: i32,
    unit_price: BigDecimal,
}

impl OrderLine {
    pub(crate) fn new(
        product_id: Uuid,
        quantity: i32,
        unit_price: BigDecimal,
    ) -> Result<Self, DomainError> {
        check_quantity(quantity)?;
        if unit_price < money::zero() {
            return Err(DomainError::InvalidArgument(format!(
                "unit price must not be negative, got {unit_price}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            product_id,
            quantity,
            unit_price,
        })
    }

    pub(crate) fn rehydrate(
        id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: BigDecimal,
    ) -> Self {
        Self {
            id,
            product_id,
            quantity,
            unit_price,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn product_id(&self) -> Uuid {
        self.product_id
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn unit_price(&self) -> &BigDecimal {
        &self.unit_price
    }

    /// `unit_price * quantity`, exact.
    pub fn subtotal(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }

    pub(crate) fn set_quantity(&mut self, quantity: i32) -> Result<(), DomainError> {
        check_quantity(quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    pub(crate) fn bump_quantity(&mut self, by: i32) -> Result<(), DomainError> {
        check_quantity(by)?;
        self.quantity += by;
        Ok(())
    }
}

fn check_quantity(quantity: i32) -> Result<(), DomainError> {
    if quantity < 1 {
        return Err(DomainError::InvalidArgument(format!(
            "quantity must be at least 1, got {quantity}"
        )));
    }
    Ok(())
}
