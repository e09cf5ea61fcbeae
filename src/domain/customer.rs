use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::{non_blank, non_blank_opt};

/// Postal address embedded in a customer profile. Country and postal code are
/// required; the rest may be absent but never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    country: String,
    city: Option<String>,
    street: Option<String>,
    house_number: Option<String>,
    postal_code: String,
}

impl Address {
    pub fn new(
        country: &str,
        city: Option<&str>,
        street: Option<&str>,
        house_number: Option<&str>,
        postal_code: &str,
    ) -> Result<Self, DomainError> {
        non_blank(country, "country")?;
        non_blank(postal_code, "postal code")?;
        non_blank_opt(city, "city")?;
        non_blank_opt(street, "street")?;
        non_blank_opt(house_number, "house number")?;
        Ok(Self {
            country: country.to_string(),
            city: city.map(str::to_string),
            street: street.map(str::to_string),
            house_number: house_number.map(str::to_string),
            postal_code: postal_code.to_string(),
        })
    }

    pub(crate) fn rehydrate(
        country: String,
        city: Option<String>,
        street: Option<String>,
        house_number: Option<String>,
        postal_code: String,
    ) -> Self {
        Self {
            country,
            city,
            street,
            house_number,
            postal_code,
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    pub fn house_number(&self) -> Option<&str> {
        self.house_number.as_deref()
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }
}

/// A registered diner. Orders and feedback reference customers by id; the
/// collections hanging off a customer are store queries, not fields here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: Uuid,
    name: String,
    surname: Option<String>,
    email: String,
    phone: String,
    date_of_birth: NaiveDate,
    address: Address,
    active: bool,
    registered_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        name: &str,
        surname: Option<&str>,
        email: &str,
        phone: &str,
        date_of_birth: NaiveDate,
        address: Address,
    ) -> Result<Self, DomainError> {
        non_blank(name, "customer name")?;
        non_blank_opt(surname, "surname")?;
        check_email(email)?;
        check_phone(phone)?;
        check_date_of_birth(date_of_birth)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            surname: surname.map(str::to_string),
            email: email.to_string(),
            phone: phone.to_string(),
            date_of_birth,
            address,
            active: true,
            registered_at: Utc::now(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn rehydrate(
        id: Uuid,
        name: String,
        surname: Option<String>,
        email: String,
        phone: String,
        date_of_birth: NaiveDate,
        address: Address,
        active: bool,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            surname,
            email,
            phone,
            date_of_birth,
            address,
            active,
            registered_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> Option<&str> {
        self.surname.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    pub fn set_email(&mut self, email: &str) -> Result<(), DomainError> {
        check_email(email)?;
        self.email = email.to_string();
        Ok(())
    }

    pub fn set_phone(&mut self, phone: &str) -> Result<(), DomainError> {
        check_phone(phone)?;
        self.phone = phone.to_string();
        Ok(())
    }

    pub fn set_address(&mut self, address: Address) {
        self.address = address;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn activate(&mut self) {
        self.active = true;
    }
}

fn check_email(email: &str) -> Result<(), DomainError> {
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !well_formed {
        return Err(DomainError::InvalidArgument(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// International format: an optional leading '+' followed by 7 to 15 digits.
fn check_phone(phone: &str) -> Result<(), DomainError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    let well_formed =
        (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());
    if !well_formed {
        return Err(DomainError::InvalidArgument(format!(
            "'{phone}' is not a valid phone number"
        )));
    }
    Ok(())
}

fn check_date_of_birth(date_of_birth: NaiveDate) -> Result<(), DomainError> {
    if date_of_birth > Utc::now().date_naive() {
        return Err(DomainError::InvalidArgument(
            "date of birth must not be in the future".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn address() -> Address {
        Address::new("Poland", Some("Warsaw"), None, None, "00-001").unwrap()
    }

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 4, 12).unwrap()
    }

    #[test]
    fn builds_an_active_customer() {
        let customer = Customer::new(
            "Anna",
            Some("Nowak"),
            "anna.nowak@example.com",
            "+48123456789",
            dob(),
            address(),
        )
        .unwrap();

        assert!(customer.is_active());
        assert_eq!(customer.surname(), Some("Nowak"));
        assert_eq!(customer.address().city(), Some("Warsaw"));
    }

    #[test]
    fn surname_is_optional_but_never_blank() {
        let no_surname = Customer::new("Anna", None, "a@example.com", "+48123456789", dob(), address());
        assert!(no_surname.is_ok());

        let blank = Customer::new("Anna", Some("  "), "a@example.com", "+48123456789", dob(), address());
        assert!(matches!(blank, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn phone_must_be_seven_to_fifteen_digits() {
        for bad in ["12345", "+48 123 456 789", "phone", "1234567890123456", ""] {
            let result = Customer::new("Anna", None, "a@example.com", bad, dob(), address());
            assert!(result.is_err(), "accepted {bad:?}");
        }
        for good in ["1234567", "+481234567", "123456789012345"] {
            let result = Customer::new("Anna", None, "a@example.com", good, dob(), address());
            assert!(result.is_ok(), "rejected {good:?}");
        }
    }

    #[test]
    fn email_needs_a_local_part_and_domain() {
        for bad in ["no-at-sign", "@example.com", "anna@", "an na@example.com"] {
            let result = Customer::new("Anna", None, bad, "+48123456789", dob(), address());
            assert!(result.is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn date_of_birth_must_not_be_in_the_future() {
        let tomorrow = Utc::now().date_naive() + Duration::days(1);
        let result = Customer::new("Anna", None, "a@example.com", "+48123456789", tomorrow, address());
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn address_requires_country_and_postal_code() {
        assert!(Address::new(" ", None, None, None, "00-001").is_err());
        assert!(Address::new("Poland", None, None, None, "").is_err());
        assert!(Address::new("Poland", Some(""), None, None, "00-001").is_err());
        assert!(Address::new("Poland", None, Some("Main St"), Some("12a"), "00-001").is_ok());
    }

    #[test]
    fn profile_setters_revalidate() {
        let mut customer =
            Customer::new("Anna", None, "a@example.com", "+48123456789", dob(), address()).unwrap();

        assert!(customer.set_email("broken").is_err());
        assert_eq!(customer.email(), "a@example.com");

        customer.set_phone("79876543210").unwrap();
        assert_eq!(customer.phone(), "79876543210");

        customer.deactivate();
        assert!(!customer.is_active());
        customer.activate();
        assert!(customer.is_active());
    }
}
