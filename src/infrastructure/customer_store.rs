use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::ports::CustomerStore;
use crate::domain::{Customer, DomainError};
use crate::schema::customers;

use super::missing_after_save;
use super::models::{CustomerRow, NewCustomerRow};

pub struct DieselCustomerStore {
    pool: DbPool,
}

impl DieselCustomerStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CustomerStore for DieselCustomerStore {
    fn save(&self, customer: &Customer) -> Result<Customer, DomainError> {
        let mut conn = self.pool.get()?;

        let row = NewCustomerRow::from_customer(customer);
        diesel::insert_into(customers::table)
            .values(&row)
            .on_conflict(customers::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)?;

        self.find_by_id(customer.id())?
            .ok_or_else(|| missing_after_save("customer", customer.id()))
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = customers::table
            .filter(customers::id.eq(id))
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(CustomerRow::into_customer))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = customers::table
            .filter(customers::email.eq(email))
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(CustomerRow::into_customer))
    }
}
