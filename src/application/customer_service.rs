use chrono::NaiveDate;
use log::info;
use uuid::Uuid;

use crate::domain::ports::CustomerStore;
use crate::domain::{Address, Customer, DomainError};

/// Customer registration and profile upkeep.
pub struct CustomerService<S> {
    customers: S,
}

impl<S: CustomerStore> CustomerService<S> {
    pub fn new(customers: S) -> Self {
        Self { customers }
    }

    pub fn register(
        &self,
        name: &str,
        surname: Option<&str>,
        email: &str,
        phone: &str,
        date_of_birth: NaiveDate,
        address: Address,
    ) -> Result<Customer, DomainError> {
        self.ensure_email_free(email, None)?;
        let customer = Customer::new(name, surname, email, phone, date_of_birth, address)?;
        let saved = self.customers.save(&customer)?;
        info!("registered customer {}", saved.id());
        Ok(saved)
    }

    pub fn find(&self, id: Uuid) -> Result<Customer, DomainError> {
        self.load(id)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        self.customers.find_by_email(email)
    }

    pub fn change_email(&self, id: Uuid, email: &str) -> Result<Customer, DomainError> {
        self.ensure_email_free(email, Some(id))?;
        let mut customer = self.load(id)?;
        customer.set_email(email)?;
        self.customers.save(&customer)
    }

    pub fn change_phone(&self, id: Uuid, phone: &str) -> Result<Customer, DomainError> {
        let mut customer = self.load(id)?;
        customer.set_phone(phone)?;
        self.customers.save(&customer)
    }

    pub fn change_address(&self, id: Uuid, address: Address) -> Result<Customer, DomainError> {
        let mut customer = self.load(id)?;
        customer.set_address(address);
        self.customers.save(&customer)
    }

    pub fn deactivate(&self, id: Uuid) -> Result<Customer, DomainError> {
        let mut customer = self.load(id)?;
        customer.deactivate();
        let saved = self.customers.save(&customer)?;
        info!("deactivated customer {id}");
        Ok(saved)
    }

    pub fn activate(&self, id: Uuid) -> Result<Customer, DomainError> {
        let mut customer = self.load(id)?;
        customer.activate();
        self.customers.save(&customer)
    }

    fn load(&self, id: Uuid) -> Result<Customer, DomainError> {
        self.customers.find_by_id(id)?.ok_or(DomainError::NotFound)
    }

    /// Email addresses are unique across customers. `except` lets a customer
    /// keep their own address on re-submit.
    fn ensure_email_free(&self, email: &str, except: Option<Uuid>) -> Result<(), DomainError> {
        match self.customers.find_by_email(email)? {
            Some(existing) if Some(existing.id()) != except => Err(DomainError::InvalidArgument(
                format!("email {email} is already registered"),
            )),
            _ => Ok(()),
        }
    }
}
