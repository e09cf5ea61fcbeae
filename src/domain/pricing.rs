use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::money;
use super::non_blank;
use super::order::Order;

/// How a pricing service decides whether its discount applies to an order.
///
/// New promotion kinds become new variants here; the order's price calculation
/// only ever reads `discount_rate` and `is_applicable`, so it never needs to
/// change when one is added.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingPolicy {
    /// Applies to every order, with the rate seeded at zero.
    Regular,
    /// Applies only to orders placed inside the window, inclusive on both ends.
    Holiday {
        holiday_name: String,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    },
}

impl PricingPolicy {
    pub const fn token(&self) -> &'static str {
        match self {
            PricingPolicy::Regular => "REGULAR",
            PricingPolicy::Holiday { .. } => "HOLIDAY",
        }
    }
}

/// A named discount policy attached to orders by reference.
///
/// Created administratively and shared between orders; operators may rename a
/// service or adjust its rate after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingService {
    id: Uuid,
    name: String,
    discount_rate: BigDecimal,
    policy: PricingPolicy,
    created_at: DateTime<Utc>,
}

impl PricingService {
    pub fn regular(name: &str) -> Result<Self, DomainError> {
        non_blank(name, "service name")?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            discount_rate: money::zero(),
            policy: PricingPolicy::Regular,
            created_at: Utc::now(),
        })
    }

    pub fn holiday(
        name: &str,
        holiday_name: &str,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        non_blank(name, "service name")?;
        non_blank(holiday_name, "holiday name")?;
        if window_end < window_start {
            return Err(DomainError::InvalidArgument(
                "holiday window end must not be before its start".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            discount_rate: money::percent(10),
            policy: PricingPolicy::Holiday {
                holiday_name: holiday_name.trim().to_string(),
                window_start,
                window_end,
            },
            created_at: Utc::now(),
        })
    }

    pub(crate) fn rehydrate(
        id: Uuid,
        name: String,
        discount_rate: BigDecimal,
        policy: PricingPolicy,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            discount_rate,
            policy,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn discount_rate(&self) -> &BigDecimal {
        &self.discount_rate
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn rename(&mut self, name: &str) -> Result<(), DomainError> {
        non_blank(name, "service name")?;
        self.name = name.to_string();
        Ok(())
    }

    pub fn set_discount_rate(&mut self, rate: BigDecimal) -> Result<(), DomainError> {
        if rate < money::zero() || rate > money::one() {
            return Err(DomainError::InvalidArgument(format!(
                "discount rate must be between 0 and 1, got {rate}"
            )));
        }
        self.discount_rate = rate;
        Ok(())
    }

    /// Whether this service's discount may be applied to `order`.
    pub fn is_applicable(&self, order: &Order) -> bool {
        match &self.policy {
            PricingPolicy::Regular => true,
            PricingPolicy::Holiday {
                window_start,
                window_end,
                ..
            } => {
                let placed = order.order_time();
                *window_start <= placed && placed <= *window_end
            }
        }
    }

    /// Attach this service to `order`, replacing whichever one priced it before.
    pub fn apply(&self, order: &mut Order) {
        order.set_pricing_service(self.clone());
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    use super::*;

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2025, 12, 24, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 12, 26, 23, 59, 59).unwrap(),
        )
    }

    fn order_placed_at(time: DateTime<Utc>) -> Order {
        let regular = PricingService::regular("Table service").unwrap();
        Order::new(Uuid::new_v4(), time, regular).unwrap()
    }

    #[test]
    fn regular_service_has_zero_rate_and_always_applies() {
        let service = PricingService::regular("Table service").unwrap();
        let order = order_placed_at(Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap());

        assert_eq!(*service.discount_rate(), money::zero());
        assert!(service.is_applicable(&order));
    }

    #[test]
    fn holiday_service_starts_at_ten_percent() {
        let (start, end) = window();
        let service = PricingService::holiday("Christmas special", "Christmas", start, end).unwrap();
        assert_eq!(*service.discount_rate(), money::percent(10));
    }

    #[test]
    fn holiday_rejects_blank_holiday_name() {
        let (start, end) = window();
        let result = PricingService::holiday("Christmas special", "   ", start, end);
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn holiday_rejects_window_ending_before_it_starts() {
        let (start, end) = window();
        let result = PricingService::holiday("Christmas special", "Christmas", end, start);
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn holiday_name_is_trimmed() {
        let (start, end) = window();
        let service =
            PricingService::holiday("Christmas special", "  Christmas  ", start, end).unwrap();
        match service.policy() {
            PricingPolicy::Holiday { holiday_name, .. } => assert_eq!(holiday_name, "Christmas"),
            other => panic!("expected holiday policy, got {other:?}"),
        }
    }

    #[test]
    fn holiday_window_is_inclusive_on_both_ends() {
        let (start, end) = window();
        let service = PricingService::holiday("Christmas special", "Christmas", start, end).unwrap();

        assert!(service.is_applicable(&order_placed_at(start)));
        assert!(service.is_applicable(&order_placed_at(end)));
        assert!(!service.is_applicable(&order_placed_at(start - Duration::seconds(1))));
        assert!(!service.is_applicable(&order_placed_at(end + Duration::seconds(1))));
    }

    #[test]
    fn discount_rate_must_stay_between_zero_and_one() {
        let mut service = PricingService::regular("Table service").unwrap();

        assert!(service.set_discount_rate("1.5".parse().unwrap()).is_err());
        assert!(service.set_discount_rate("-0.1".parse().unwrap()).is_err());
        assert_eq!(*service.discount_rate(), money::zero());

        service.set_discount_rate("0.25".parse().unwrap()).unwrap();
        assert_eq!(*service.discount_rate(), "0.25".parse::<BigDecimal>().unwrap());
    }

    #[test]
    fn rename_rejects_blank_names() {
        let mut service = PricingService::regular("Table service").unwrap();
        assert!(service.rename("").is_err());
        service.rename("Weekday service").unwrap();
        assert_eq!(service.name(), "Weekday service");
    }
}
