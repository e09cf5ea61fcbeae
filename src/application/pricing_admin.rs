use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use log::info;
use uuid::Uuid;

use crate::domain::ports::{OrderStore, PricingStore};
use crate::domain::{DomainError, PricingService};

/// Administration of pricing services and their attachment to orders.
pub struct PricingAdmin<P, O> {
    pricing: P,
    orders: O,
}

impl<P: PricingStore, O: OrderStore> PricingAdmin<P, O> {
    pub fn new(pricing: P, orders: O) -> Self {
        Self { pricing, orders }
    }

    pub fn create_regular(&self, name: &str) -> Result<PricingService, DomainError> {
        let service = PricingService::regular(name)?;
        let saved = self.pricing.save(&service)?;
        info!("created regular pricing service {}", saved.id());
        Ok(saved)
    }

    pub fn create_holiday(
        &self,
        name: &str,
        holiday_name: &str,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<PricingService, DomainError> {
        let service = PricingService::holiday(name, holiday_name, window_start, window_end)?;
        let saved = self.pricing.save(&service)?;
        info!("created holiday pricing service {}", saved.id());
        Ok(saved)
    }

    pub fn rename(&self, id: Uuid, name: &str) -> Result<PricingService, DomainError> {
        let mut service = self.load(id)?;
        service.rename(name)?;
        self.pricing.save(&service)
    }

    pub fn set_rate(&self, id: Uuid, rate: BigDecimal) -> Result<PricingService, DomainError> {
        let mut service = self.load(id)?;
        service.set_discount_rate(rate)?;
        self.pricing.save(&service)
    }

    pub fn list(&self) -> Result<Vec<PricingService>, DomainError> {
        self.pricing.find_all()
    }

    pub fn find(&self, id: Uuid) -> Result<PricingService, DomainError> {
        self.load(id)
    }

    /// Switch an order over to another pricing service. The new rate shows up
    /// in the order's final price immediately.
    pub fn attach_to_order(&self, service_id: Uuid, order_id: Uuid) -> Result<(), DomainError> {
        let service = self.load(service_id)?;
        let mut order = self
            .orders
            .find_by_id(order_id)?
            .ok_or(DomainError::NotFound)?;
        service.apply(&mut order);
        self.orders.save(&order)?;
        info!("attached pricing service {service_id} to order {order_id}");
        Ok(())
    }

    fn load(&self, id: Uuid) -> Result<PricingService, DomainError> {
        self.pricing.find_by_id(id)?.ok_or(DomainError::NotFound)
    }
}
