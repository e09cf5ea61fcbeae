use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{DomainError, ValidationFailure};
use super::feedback::Feedback;
use super::money;
use super::non_blank;
use super::order_line::OrderLine;
use super::pricing::PricingService;
use super::product::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    InProgress,
    Served,
    Canceled,
    Completed,
}

impl OrderStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Served => "SERVED",
            OrderStatus::Canceled => "CANCELED",
            OrderStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(OrderStatus::New),
            "IN_PROGRESS" => Ok(OrderStatus::InProgress),
            "SERVED" => Ok(OrderStatus::Served),
            "CANCELED" => Ok(OrderStatus::Canceled),
            "COMPLETED" => Ok(OrderStatus::Completed),
            _ => Err(DomainError::InvalidArgument(format!(
                "unknown order status '{s}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "UNPAID",
            PaymentStatus::Paid => "PAID",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNPAID" => Ok(PaymentStatus::Unpaid),
            "PAID" => Ok(PaymentStatus::Paid),
            _ => Err(DomainError::InvalidArgument(format!(
                "unknown payment status '{s}'"
            ))),
        }
    }
}

/// Aggregate root for a single dining transaction.
///
/// The order owns its lines and feedback outright and is the only way to
/// mutate them; callers get read-only views. Status moves NEW -> IN_PROGRESS
/// -> SERVED -> COMPLETED, with CANCELED reachable from NEW and reversible
/// through [`Order::reactivate`]. Once an order is SERVED its lines are
/// frozen, and CANCELED or COMPLETED orders ignore further status updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: Uuid,
    customer_id: Uuid,
    table_number: Option<i32>,
    order_time: DateTime<Utc>,
    status: OrderStatus,
    payment_status: PaymentStatus,
    notes: Option<String>,
    pricing: PricingService,
    lines: Vec<OrderLine>,
    feedback: Vec<Feedback>,
}

impl Order {
    /// Open a cart for `customer_id`, priced by `pricing` until another
    /// service is applied. The order time is fixed here and never changes.
    pub fn new(
        customer_id: Uuid,
        order_time: DateTime<Utc>,
        pricing: PricingService,
    ) -> Result<Self, DomainError> {
        if order_time > Utc::now() {
            return Err(DomainError::InvalidArgument(
                "order time must not be in the future".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            customer_id,
            table_number: None,
            order_time,
            status: OrderStatus::New,
            payment_status: PaymentStatus::Unpaid,
            notes: None,
            pricing,
            lines: Vec::new(),
            feedback: Vec::new(),
        })
    }

    pub(crate) fn from_record(record: OrderRecord) -> Self {
        Self {
            id: record.id,
            customer_id: record.customer_id,
            table_number: record.table_number,
            order_time: record.order_time,
            status: record.status,
            payment_status: record.payment_status,
            notes: record.notes,
            pricing: record.pricing,
            lines: record.lines,
            feedback: record.feedback,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn customer_id(&self) -> Uuid {
        self.customer_id
    }

    pub fn table_number(&self) -> Option<i32> {
        self.table_number
    }

    pub fn order_time(&self) -> DateTime<Utc> {
        self.order_time
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn pricing(&self) -> &PricingService {
        &self.pricing
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    pub fn line_for(&self, product_id: Uuid) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    pub fn set_table_number(&mut self, table_number: i32) -> Result<(), DomainError> {
        if table_number < 1 {
            return Err(DomainError::InvalidArgument(format!(
                "table number must be at least 1, got {table_number}"
            )));
        }
        self.table_number = Some(table_number);
        Ok(())
    }

    /// Blank notes are treated as no notes at all.
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.filter(|n| !n.trim().is_empty());
    }

    pub(crate) fn set_pricing_service(&mut self, pricing: PricingService) {
        self.pricing = pricing;
    }

    /// Start a new line for a product not yet on the order, at the unit price
    /// the caller captured from the catalog.
    pub fn add_line(
        &mut self,
        product_id: Uuid,
        quantity: i32,
        unit_price: BigDecimal,
    ) -> Result<(), DomainError> {
        self.ensure_lines_editable()?;
        if self.line_for(product_id).is_some() {
            return Err(DomainError::InvalidArgument(format!(
                "product {product_id} is already on this order"
            )));
        }
        let line = OrderLine::new(product_id, quantity, unit_price)?;
        self.lines.push(line);
        Ok(())
    }

    /// Cart-style add: bump the quantity if the product is already on the
    /// order, otherwise open a new line at the product's current price.
    pub fn add_product(&mut self, product: &Product, quantity: i32) -> Result<(), DomainError> {
        self.ensure_lines_editable()?;
        match self.line_mut(product.id()) {
            Some(line) => line.bump_quantity(quantity),
            None => {
                let line = OrderLine::new(product.id(), quantity, product.price().clone())?;
                self.lines.push(line);
                Ok(())
            }
        }
    }

    pub fn set_line_quantity(&mut self, product_id: Uuid, quantity: i32) -> Result<(), DomainError> {
        self.ensure_lines_editable()?;
        match self.line_mut(product_id) {
            Some(line) => line.set_quantity(quantity),
            None => Err(no_line_for(product_id)),
        }
    }

    pub fn remove_line(&mut self, product_id: Uuid) -> Result<(), DomainError> {
        self.ensure_lines_editable()?;
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id() != product_id);
        if self.lines.len() == before {
            return Err(no_line_for(product_id));
        }
        Ok(())
    }

    /// Employee dashboard update. Frozen orders (CANCELED or COMPLETED) are
    /// left untouched; a SERVED and PAID combination completes the order.
    pub fn update_status_and_payment(&mut self, status: OrderStatus, payment: PaymentStatus) {
        if matches!(self.status, OrderStatus::Canceled | OrderStatus::Completed) {
            return;
        }
        self.status = status;
        self.payment_status = payment;
        if self.status == OrderStatus::Served && self.payment_status == PaymentStatus::Paid {
            self.status = OrderStatus::Completed;
        }
    }

    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status != OrderStatus::New || self.payment_status != PaymentStatus::Unpaid {
            return Err(DomainError::IllegalState(format!(
                "only NEW and UNPAID orders can be canceled, this one is {}/{}",
                self.status, self.payment_status
            )));
        }
        self.status = OrderStatus::Canceled;
        Ok(())
    }

    /// Bring a CANCELED order back to NEW. Anything else is left as is.
    pub fn reactivate(&mut self) {
        if self.status == OrderStatus::Canceled {
            self.status = OrderStatus::New;
        }
    }

    /// Record a payment update. Paying a SERVED order completes it. CANCELED
    /// orders take no payments, and a COMPLETED order cannot go back to
    /// UNPAID.
    pub fn pay(&mut self, payment: PaymentStatus) -> Result<(), DomainError> {
        match self.status {
            OrderStatus::Canceled => {
                return Err(DomainError::IllegalState(
                    "canceled orders cannot take payment updates".to_string(),
                ))
            }
            OrderStatus::Completed if payment == PaymentStatus::Unpaid => {
                return Err(DomainError::IllegalState(
                    "completed orders cannot be marked unpaid".to_string(),
                ))
            }
            _ => {}
        }
        self.payment_status = payment;
        if self.status == OrderStatus::Served && self.payment_status == PaymentStatus::Paid {
            self.status = OrderStatus::Completed;
        }
        Ok(())
    }

    pub fn add_feedback(
        &mut self,
        customer_id: Uuid,
        description: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<Feedback, DomainError> {
        non_blank(description, "feedback description")?;
        if customer_id != self.customer_id {
            return Err(DomainError::InvalidArgument(
                "feedback must come from the customer who placed the order".to_string(),
            ));
        }
        if submitted_at > Utc::now() {
            return Err(DomainError::InvalidArgument(
                "feedback must not be dated in the future".to_string(),
            ));
        }
        let feedback = Feedback::new(customer_id, description.to_string(), submitted_at);
        self.feedback.push(feedback.clone());
        Ok(feedback)
    }

    /// Pre-fee subtotal: the exact sum of every line's subtotal.
    pub fn total_amount(&self) -> BigDecimal {
        self.lines
            .iter()
            .map(|l| l.subtotal())
            .fold(money::zero(), |acc, s| acc + s)
    }

    /// Fixed 10% restaurant fee on the subtotal.
    pub fn service_fee(&self) -> BigDecimal {
        self.total_amount() * money::percent(money::SERVICE_FEE_PERCENT)
    }

    /// `(subtotal + service fee) * (1 - rate)`, where the rate counts only if
    /// it is positive and the pricing service declares itself applicable.
    pub fn final_price(&self) -> BigDecimal {
        let base = self.total_amount() + self.service_fee();
        base * (money::one() - self.effective_discount_rate())
    }

    fn effective_discount_rate(&self) -> BigDecimal {
        let rate = self.pricing.discount_rate();
        if *rate > money::zero() && self.pricing.is_applicable(self) {
            rate.clone()
        } else {
            money::zero()
        }
    }

    /// Pre-persistence checkpoint: collects every broken invariant instead of
    /// stopping at the first. Stores refuse to write when this fails.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut violations = Vec::new();
        if self.order_time > Utc::now() {
            violations.push("order time must not be in the future".to_string());
        }
        if self.status == OrderStatus::Completed && self.payment_status != PaymentStatus::Paid {
            violations.push("a completed order must be paid".to_string());
        }
        if self.final_price() < money::zero() {
            violations.push("final price must not be negative".to_string());
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure { violations })
        }
    }

    fn line_mut(&mut self, product_id: Uuid) -> Option<&mut OrderLine> {
        self.lines.iter_mut().find(|l| l.product_id() == product_id)
    }

    fn ensure_lines_editable(&self) -> Result<(), DomainError> {
        if matches!(self.status, OrderStatus::Served | OrderStatus::Completed) {
            return Err(DomainError::IllegalState(format!(
                "order lines are frozen once the order is {}",
                self.status
            )));
        }
        Ok(())
    }
}

fn no_line_for(product_id: Uuid) -> DomainError {
    DomainError::InvalidArgument(format!("no line for product {product_id} on this order"))
}

/// Raw field set stores use to rebuild a persisted order without re-running
/// the lifecycle guards.
pub(crate) struct OrderRecord {
    pub(crate) id: Uuid,
    pub(crate) customer_id: Uuid,
    pub(crate) table_number: Option<i32>,
    pub(crate) order_time: DateTime<Utc>,
    pub(crate) status: OrderStatus,
    pub(crate) payment_status: PaymentStatus,
    pub(crate) notes: Option<String>,
    pub(crate) pricing: PricingService,
    pub(crate) lines: Vec<OrderLine>,
    pub(crate) feedback: Vec<Feedback>,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn price(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    fn regular() -> PricingService {
        PricingService::regular("Table service").unwrap()
    }

    fn cart() -> Order {
        Order::new(Uuid::new_v4(), Utc::now(), regular()).unwrap()
    }

    fn cart_with_two_lines() -> Order {
        let mut order = cart();
        order.add_line(Uuid::new_v4(), 2, price("7.50")).unwrap();
        order.add_line(Uuid::new_v4(), 1, price("3.00")).unwrap();
        order
    }

    fn holiday_around(time: DateTime<Utc>) -> PricingService {
        PricingService::holiday(
            "Christmas special",
            "Christmas",
            time - Duration::hours(1),
            time + Duration::hours(1),
        )
        .unwrap()
    }

    #[test]
    fn new_cart_starts_new_and_unpaid() {
        let order = cart();

        assert_eq!(order.status(), OrderStatus::New);
        assert_eq!(order.payment_status(), PaymentStatus::Unpaid);
        assert!(order.lines().is_empty());
        assert!(order.feedback().is_empty());
        assert_eq!(order.table_number(), None);
    }

    #[test]
    fn empty_order_prices_to_zero() {
        let order = cart();

        assert_eq!(order.total_amount(), price("0"));
        assert_eq!(order.service_fee(), price("0"));
        assert_eq!(order.final_price(), price("0"));
    }

    #[test]
    fn order_time_must_not_be_in_the_future() {
        let result = Order::new(Uuid::new_v4(), Utc::now() + Duration::hours(1), regular());
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn totals_for_an_undiscounted_order() {
        let order = cart_with_two_lines();

        assert_eq!(order.total_amount(), price("18.00"));
        assert_eq!(order.service_fee(), price("1.80"));
        assert_eq!(order.final_price(), price("19.80"));
    }

    #[test]
    fn holiday_discount_applies_inside_its_window() {
        let mut order = cart_with_two_lines();
        holiday_around(order.order_time()).apply(&mut order);

        assert_eq!(order.final_price(), price("17.82"));
    }

    #[test]
    fn holiday_discount_is_skipped_outside_its_window() {
        let mut order = cart_with_two_lines();
        let start = Utc.with_ymd_and_hms(2025, 12, 24, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 12, 26, 0, 0, 0).unwrap();
        let past_holiday = PricingService::holiday("Christmas special", "Christmas", start, end)
            .unwrap();
        past_holiday.apply(&mut order);

        assert_eq!(order.final_price(), price("19.80"));
    }

    #[test]
    fn zero_rate_never_discounts() {
        let order = cart_with_two_lines();
        assert_eq!(
            order.final_price(),
            order.total_amount() + order.service_fee()
        );
    }

    #[test]
    fn adding_a_line_raises_the_subtotal_by_its_own() {
        let mut order = cart_with_two_lines();
        let before = order.total_amount();

        order.add_line(Uuid::new_v4(), 3, price("4.25")).unwrap();

        assert_eq!(order.total_amount(), before + price("12.75"));
    }

    #[test]
    fn a_product_appears_on_at_most_one_line() {
        let mut order = cart();
        let product_id = Uuid::new_v4();
        order.add_line(product_id, 1, price("7.50")).unwrap();

        let result = order.add_line(product_id, 2, price("7.50"));

        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
        assert_eq!(order.lines().len(), 1);
    }

    #[test]
    fn rejected_line_leaves_the_order_unchanged() {
        let mut order = cart();

        let result = order.add_line(Uuid::new_v4(), 0, price("7.50"));

        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
        assert!(order.lines().is_empty());
    }

    #[test]
    fn add_product_bumps_an_existing_line() {
        let product = Product::food(
            "Margherita",
            None,
            price("7.50"),
            850,
            450.0,
            vec!["dough".into(), "tomato".into(), "mozzarella".into()],
        )
        .unwrap();
        let mut order = cart();

        order.add_product(&product, 1).unwrap();
        order.add_product(&product, 2).unwrap();

        assert_eq!(order.lines().len(), 1);
        assert_eq!(order.lines()[0].quantity(), 3);
        assert_eq!(*order.lines()[0].unit_price(), price("7.50"));
    }

    #[test]
    fn set_line_quantity_targets_the_matching_line() {
        let mut order = cart();
        let product_id = Uuid::new_v4();
        order.add_line(product_id, 1, price("7.50")).unwrap();

        order.set_line_quantity(product_id, 4).unwrap();
        assert_eq!(order.lines()[0].quantity(), 4);

        let unknown = order.set_line_quantity(Uuid::new_v4(), 2);
        assert!(matches!(unknown, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn remove_line_detaches_the_product() {
        let mut order = cart();
        let product_id = Uuid::new_v4();
        order.add_line(product_id, 1, price("7.50")).unwrap();

        order.remove_line(product_id).unwrap();
        assert!(order.lines().is_empty());

        let again = order.remove_line(product_id);
        assert!(matches!(again, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn lines_freeze_once_the_order_is_served() {
        let mut order = cart();
        let product_id = Uuid::new_v4();
        order.add_line(product_id, 1, price("7.50")).unwrap();
        order.update_status_and_payment(OrderStatus::Served, PaymentStatus::Unpaid);

        assert!(matches!(
            order.add_line(Uuid::new_v4(), 1, price("3.00")),
            Err(DomainError::IllegalState(_))
        ));
        assert!(matches!(
            order.set_line_quantity(product_id, 2),
            Err(DomainError::IllegalState(_))
        ));
        assert!(matches!(
            order.remove_line(product_id),
            Err(DomainError::IllegalState(_))
        ));
        assert_eq!(order.lines().len(), 1);
        assert_eq!(order.lines()[0].quantity(), 1);
    }

    #[test]
    fn update_status_and_payment_sets_both_fields() {
        let mut order = cart();

        order.update_status_and_payment(OrderStatus::InProgress, PaymentStatus::Unpaid);

        assert_eq!(order.status(), OrderStatus::InProgress);
        assert_eq!(order.payment_status(), PaymentStatus::Unpaid);
    }

    #[test]
    fn served_and_paid_complete_the_order() {
        for initial in [OrderStatus::New, OrderStatus::InProgress, OrderStatus::Served] {
            let mut order = cart();
            order.update_status_and_payment(initial, PaymentStatus::Unpaid);

            order.update_status_and_payment(OrderStatus::Served, PaymentStatus::Paid);

            assert_eq!(order.status(), OrderStatus::Completed, "from {initial}");
            assert_eq!(order.payment_status(), PaymentStatus::Paid);
        }
    }

    #[test]
    fn frozen_orders_ignore_status_updates() {
        let mut canceled = cart();
        canceled.cancel().unwrap();
        canceled.update_status_and_payment(OrderStatus::Served, PaymentStatus::Paid);
        assert_eq!(canceled.status(), OrderStatus::Canceled);
        assert_eq!(canceled.payment_status(), PaymentStatus::Unpaid);

        let mut completed = cart();
        completed.update_status_and_payment(OrderStatus::Served, PaymentStatus::Paid);
        completed.update_status_and_payment(OrderStatus::New, PaymentStatus::Unpaid);
        assert_eq!(completed.status(), OrderStatus::Completed);
        assert_eq!(completed.payment_status(), PaymentStatus::Paid);
    }

    #[test]
    fn cancel_works_once_from_new_and_unpaid() {
        let mut order = cart();

        order.cancel().unwrap();
        assert_eq!(order.status(), OrderStatus::Canceled);

        let again = order.cancel();
        assert!(matches!(again, Err(DomainError::IllegalState(_))));
    }

    #[test]
    fn cancel_rejects_orders_already_in_progress() {
        let mut order = cart();
        order.update_status_and_payment(OrderStatus::InProgress, PaymentStatus::Unpaid);

        assert!(matches!(order.cancel(), Err(DomainError::IllegalState(_))));
        assert_eq!(order.status(), OrderStatus::InProgress);
    }

    #[test]
    fn cancel_rejects_paid_orders() {
        let mut order = cart();
        order.pay(PaymentStatus::Paid).unwrap();

        assert!(matches!(order.cancel(), Err(DomainError::IllegalState(_))));
    }

    #[test]
    fn reactivate_returns_a_canceled_order_to_new() {
        let mut order = cart();
        order.cancel().unwrap();

        order.reactivate();

        assert_eq!(order.status(), OrderStatus::New);
    }

    #[test]
    fn reactivate_leaves_other_states_alone() {
        let mut order = cart();
        order.update_status_and_payment(OrderStatus::Served, PaymentStatus::Unpaid);

        order.reactivate();

        assert_eq!(order.status(), OrderStatus::Served);
    }

    #[test]
    fn paying_a_served_order_completes_it() {
        let mut order = cart();
        order.update_status_and_payment(OrderStatus::Served, PaymentStatus::Unpaid);

        order.pay(PaymentStatus::Paid).unwrap();

        assert_eq!(order.status(), OrderStatus::Completed);
        assert_eq!(order.payment_status(), PaymentStatus::Paid);
    }

    #[test]
    fn paying_a_new_order_does_not_advance_it() {
        let mut order = cart();

        order.pay(PaymentStatus::Paid).unwrap();

        assert_eq!(order.status(), OrderStatus::New);
        assert_eq!(order.payment_status(), PaymentStatus::Paid);
    }

    #[test]
    fn canceled_orders_take_no_payments() {
        let mut order = cart();
        order.cancel().unwrap();

        let result = order.pay(PaymentStatus::Paid);

        assert!(matches!(result, Err(DomainError::IllegalState(_))));
        assert_eq!(order.payment_status(), PaymentStatus::Unpaid);
    }

    #[test]
    fn completed_orders_cannot_revert_to_unpaid() {
        let mut order = cart();
        order.update_status_and_payment(OrderStatus::Served, PaymentStatus::Paid);

        assert!(matches!(
            order.pay(PaymentStatus::Unpaid),
            Err(DomainError::IllegalState(_))
        ));
        order.pay(PaymentStatus::Paid).unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);
    }

    #[test]
    fn table_number_must_be_at_least_one() {
        let mut order = cart();

        assert!(order.set_table_number(0).is_err());
        assert_eq!(order.table_number(), None);

        order.set_table_number(12).unwrap();
        assert_eq!(order.table_number(), Some(12));
    }

    #[test]
    fn blank_notes_collapse_to_none() {
        let mut order = cart();

        order.set_notes(Some("   ".to_string()));
        assert_eq!(order.notes(), None);

        order.set_notes(Some("no onions".to_string()));
        assert_eq!(order.notes(), Some("no onions"));
    }

    #[test]
    fn feedback_must_come_from_the_orders_customer() {
        let mut order = cart();
        let stranger = Uuid::new_v4();

        let result = order.add_feedback(stranger, "lovely", Utc::now());

        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
        assert!(order.feedback().is_empty());
    }

    #[test]
    fn feedback_description_must_not_be_blank() {
        let mut order = cart();
        let customer = order.customer_id();

        let result = order.add_feedback(customer, "  ", Utc::now());

        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn feedback_must_not_be_dated_in_the_future() {
        let mut order = cart();
        let customer = order.customer_id();

        let result = order.add_feedback(customer, "lovely", Utc::now() + Duration::hours(1));

        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
        assert!(order.feedback().is_empty());
    }

    #[test]
    fn feedback_from_the_owner_is_recorded() {
        let mut order = cart();
        let customer = order.customer_id();

        let feedback = order
            .add_feedback(customer, "great service", Utc::now())
            .unwrap();

        assert_eq!(order.feedback().len(), 1);
        assert_eq!(order.feedback()[0].id(), feedback.id());
        assert_eq!(order.feedback()[0].description(), "great service");
    }

    #[test]
    fn validate_accepts_a_consistent_order() {
        let mut order = cart_with_two_lines();
        order.set_table_number(3).unwrap();

        assert!(order.validate().is_ok());
    }

    #[test]
    fn validate_collects_every_violation_at_once() {
        let pricing = regular();
        let order = Order::from_record(OrderRecord {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            table_number: Some(3),
            order_time: Utc::now() + Duration::hours(2),
            status: OrderStatus::Completed,
            payment_status: PaymentStatus::Unpaid,
            notes: None,
            pricing,
            lines: vec![OrderLine::rehydrate(
                Uuid::new_v4(),
                Uuid::new_v4(),
                1,
                price("-10.00"),
            )],
            feedback: Vec::new(),
        });

        let failure = order.validate().unwrap_err();

        assert_eq!(failure.violations.len(), 3);
        assert!(failure
            .violations
            .iter()
            .any(|v| v.contains("future")));
        assert!(failure.violations.iter().any(|v| v.contains("paid")));
        assert!(failure.violations.iter().any(|v| v.contains("negative")));
    }

    #[test]
    fn status_tokens_round_trip() {
        for status in [
            OrderStatus::New,
            OrderStatus::InProgress,
            OrderStatus::Served,
            OrderStatus::Canceled,
            OrderStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        for payment in [PaymentStatus::Unpaid, PaymentStatus::Paid] {
            assert_eq!(payment.as_str().parse::<PaymentStatus>().unwrap(), payment);
        }
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert!(matches!(
            "DONE".parse::<OrderStatus>(),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            "paid".parse::<PaymentStatus>(),
            Err(DomainError::InvalidArgument(_))
        ));
    }
}
