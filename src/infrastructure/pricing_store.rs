use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::ports::PricingStore;
use crate::domain::{DomainError, PricingService};
use crate::schema::pricing_services;

use super::missing_after_save;
use super::models::{NewPricingServiceRow, PricingServiceRow};

pub struct DieselPricingStore {
    pool: DbPool,
}

impl DieselPricingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PricingStore for DieselPricingStore {
    fn save(&self, service: &PricingService) -> Result<PricingService, DomainError> {
        let mut conn = self.pool.get()?;

        let row = NewPricingServiceRow::from_service(service);
        diesel::insert_into(pricing_services::table)
            .values(&row)
            .on_conflict(pricing_services::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)?;

        self.find_by_id(service.id())?
            .ok_or_else(|| missing_after_save("pricing service", service.id()))
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<PricingService>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = pricing_services::table
            .filter(pricing_services::id.eq(id))
            .select(PricingServiceRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(PricingServiceRow::into_service).transpose()
    }

    fn find_all(&self) -> Result<Vec<PricingService>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = pricing_services::table
            .order(pricing_services::created_at.asc())
            .then_order_by(pricing_services::id.asc())
            .select(PricingServiceRow::as_select())
            .load(&mut conn)?;
        rows.into_iter()
            .map(PricingServiceRow::into_service)
            .collect()
    }

    /// The oldest regular service doubles as the default for new carts.
    fn find_default(&self) -> Result<Option<PricingService>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = pricing_services::table
            .filter(pricing_services::kind.eq("REGULAR"))
            .order(pricing_services::created_at.asc())
            .then_order_by(pricing_services::id.asc())
            .select(PricingServiceRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(PricingServiceRow::into_service).transpose()
    }
}
