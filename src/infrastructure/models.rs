use std::collections::BTreeSet;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    Address, Category, Customer, DomainError, Feedback, Image, ImageFormat, Order, OrderLine,
    OrderRecord, PricingPolicy, PricingService, Product, ProductKind,
};
use crate::schema::{
    categories, customers, feedback, order_lines, orders, pricing_services, product_categories,
    product_images, products,
};

fn missing_column(entity: &str, id: Uuid, column: &str) -> DomainError {
    DomainError::Internal(format!("{entity} row {id} is missing {column}"))
}

// ── Customers ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub id: Uuid,
    pub name: String,
    pub surname: Option<String>,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub country: String,
    pub city: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postal_code: String,
    pub active: bool,
    pub registered_at: DateTime<Utc>,
}

impl CustomerRow {
    pub fn into_customer(self) -> Customer {
        let address = Address::rehydrate(
            self.country,
            self.city,
            self.street,
            self.house_number,
            self.postal_code,
        );
        Customer::rehydrate(
            self.id,
            self.name,
            self.surname,
            self.email,
            self.phone,
            self.date_of_birth,
            address,
            self.active,
            self.registered_at,
        )
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = customers)]
#[diesel(treat_none_as_null = true)]
pub struct NewCustomerRow {
    pub id: Uuid,
    pub name: String,
    pub surname: Option<String>,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub country: String,
    pub city: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postal_code: String,
    pub active: bool,
    pub registered_at: DateTime<Utc>,
}

impl NewCustomerRow {
    pub fn from_customer(customer: &Customer) -> Self {
        let address = customer.address();
        Self {
            id: customer.id(),
            name: customer.name().to_string(),
            surname: customer.surname().map(str::to_string),
            email: customer.email().to_string(),
            phone: customer.phone().to_string(),
            date_of_birth: customer.date_of_birth(),
            country: address.country().to_string(),
            city: address.city().map(str::to_string),
            street: address.street().map(str::to_string),
            house_number: address.house_number().map(str::to_string),
            postal_code: address.postal_code().to_string(),
            active: customer.is_active(),
            registered_at: customer.registered_at(),
        }
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
}

impl CategoryRow {
    pub fn into_category(self) -> Category {
        Category::rehydrate(self.id, self.name)
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = categories)]
pub struct NewCategoryRow {
    pub id: Uuid,
    pub name: String,
}

impl NewCategoryRow {
    pub fn from_category(category: &Category) -> Self {
        Self {
            id: category.id(),
            name: category.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub calories: i32,
    pub weight_grams: f64,
    pub kind: String,
    pub ingredients: Option<Value>,
    pub alcohol_percent: Option<f64>,
    pub carbonated: Option<bool>,
    pub ice_cream: Option<String>,
    pub sugar_per_gram: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl ProductRow {
    /// Rebuild the domain product from its row plus the already-loaded
    /// association rows. The `kind` discriminator decides which of the
    /// nullable variant columns must be present.
    pub fn into_product(
        self,
        category_ids: BTreeSet<Uuid>,
        images: Vec<Image>,
    ) -> Result<Product, DomainError> {
        let kind = match self.kind.as_str() {
            "FOOD" => {
                let raw = self
                    .ingredients
                    .ok_or_else(|| missing_column("product", self.id, "ingredients"))?;
                let ingredients: Vec<String> = serde_json::from_value(raw).map_err(|e| {
                    DomainError::Internal(format!(
                        "product row {} has a malformed ingredients payload: {e}",
                        self.id
                    ))
                })?;
                ProductKind::Food { ingredients }
            }
            "DRINK" => ProductKind::Drink {
                alcohol_percent: self
                    .alcohol_percent
                    .ok_or_else(|| missing_column("product", self.id, "alcohol_percent"))?,
                carbonated: self
                    .carbonated
                    .ok_or_else(|| missing_column("product", self.id, "carbonated"))?,
            },
            "DESSERT" => ProductKind::Dessert {
                sugar_per_gram: self
                    .sugar_per_gram
                    .ok_or_else(|| missing_column("product", self.id, "sugar_per_gram"))?,
            },
            "MILK_COCKTAIL" => ProductKind::MilkCocktail {
                alcohol_percent: self
                    .alcohol_percent
                    .ok_or_else(|| missing_column("product", self.id, "alcohol_percent"))?,
                carbonated: self
                    .carbonated
                    .ok_or_else(|| missing_column("product", self.id, "carbonated"))?,
                ice_cream: self
                    .ice_cream
                    .ok_or_else(|| missing_column("product", self.id, "ice_cream"))?
                    .parse()?,
                sugar_per_gram: self
                    .sugar_per_gram
                    .ok_or_else(|| missing_column("product", self.id, "sugar_per_gram"))?,
            },
            other => {
                return Err(DomainError::Internal(format!(
                    "unknown product kind '{other}' on row {}",
                    self.id
                )))
            }
        };
        Ok(Product::rehydrate(
            self.id,
            self.name,
            self.description,
            self.price,
            self.calories,
            self.weight_grams,
            kind,
            category_ids,
            images,
        ))
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = products)]
#[diesel(treat_none_as_null = true)]
pub struct NewProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub calories: i32,
    pub weight_grams: f64,
    pub kind: String,
    pub ingredients: Option<Value>,
    pub alcohol_percent: Option<f64>,
    pub carbonated: Option<bool>,
    pub ice_cream: Option<String>,
    pub sugar_per_gram: Option<f64>,
}

impl NewProductRow {
    pub fn from_product(product: &Product) -> Self {
        let mut row = Self {
            id: product.id(),
            name: product.name().to_string(),
            description: product.description().map(str::to_string),
            price: product.price().clone(),
            calories: product.calories(),
            weight_grams: product.weight_grams(),
            kind: product.kind().token().to_string(),
            ingredients: None,
            alcohol_percent: None,
            carbonated: None,
            ice_cream: None,
            sugar_per_gram: None,
        };
        match product.kind() {
            ProductKind::Food { ingredients } => {
                row.ingredients = Some(Value::from(ingredients.clone()));
            }
            ProductKind::Drink {
                alcohol_percent,
                carbonated,
            } => {
                row.alcohol_percent = Some(*alcohol_percent);
                row.carbonated = Some(*carbonated);
            }
            ProductKind::Dessert { sugar_per_gram } => {
                row.sugar_per_gram = Some(*sugar_per_gram);
            }
            ProductKind::MilkCocktail {
                alcohol_percent,
                carbonated,
                ice_cream,
                sugar_per_gram,
            } => {
                row.alcohol_percent = Some(*alcohol_percent);
                row.carbonated = Some(*carbonated);
                row.ice_cream = Some(ice_cream.to_string());
                row.sugar_per_gram = Some(*sugar_per_gram);
            }
        }
        row
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = product_categories)]
pub struct NewProductCategoryRow {
    pub product_id: Uuid,
    pub category_id: Uuid,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = product_images)]
#[diesel(belongs_to(ProductRow, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ImageRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub format: String,
    pub preview: bool,
    pub data: Vec<u8>,
}

impl ImageRow {
    pub fn into_image(self) -> Result<Image, DomainError> {
        let format = self.format.parse::<ImageFormat>()?;
        Ok(Image::rehydrate(self.id, format, self.preview, self.data))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = product_images)]
pub struct NewImageRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub format: String,
    pub preview: bool,
    pub data: Vec<u8>,
}

impl NewImageRow {
    pub fn from_image(product_id: Uuid, image: &Image) -> Self {
        Self {
            id: image.id(),
            product_id,
            format: image.format().to_string(),
            preview: image.is_preview(),
            data: image.data().to_vec(),
        }
    }
}

// ── Pricing services ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = pricing_services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PricingServiceRow {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub discount_rate: BigDecimal,
    pub holiday_name: Option<String>,
    pub window_start: Option<DateTime<Utc>>,
    pub window_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PricingServiceRow {
    pub fn into_service(self) -> Result<PricingService, DomainError> {
        let policy = match self.kind.as_str() {
            "REGULAR" => PricingPolicy::Regular,
            "HOLIDAY" => PricingPolicy::Holiday {
                holiday_name: self
                    .holiday_name
                    .ok_or_else(|| missing_column("pricing service", self.id, "holiday_name"))?,
                window_start: self
                    .window_start
                    .ok_or_else(|| missing_column("pricing service", self.id, "window_start"))?,
                window_end: self
                    .window_end
                    .ok_or_else(|| missing_column("pricing service", self.id, "window_end"))?,
            },
            other => {
                return Err(DomainError::Internal(format!(
                    "unknown pricing service kind '{other}' on row {}",
                    self.id
                )))
            }
        };
        Ok(PricingService::rehydrate(
            self.id,
            self.name,
            self.discount_rate,
            policy,
            self.created_at,
        ))
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = pricing_services)]
#[diesel(treat_none_as_null = true)]
pub struct NewPricingServiceRow {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub discount_rate: BigDecimal,
    pub holiday_name: Option<String>,
    pub window_start: Option<DateTime<Utc>>,
    pub window_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NewPricingServiceRow {
    pub fn from_service(service: &PricingService) -> Self {
        let (holiday_name, window_start, window_end) = match service.policy() {
            PricingPolicy::Regular => (None, None, None),
            PricingPolicy::Holiday {
                holiday_name,
                window_start,
                window_end,
            } => (
                Some(holiday_name.clone()),
                Some(*window_start),
                Some(*window_end),
            ),
        };
        Self {
            id: service.id(),
            name: service.name().to_string(),
            kind: service.policy().token().to_string(),
            discount_rate: service.discount_rate().clone(),
            holiday_name,
            window_start,
            window_end,
            created_at: service.created_at(),
        }
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub pricing_service_id: Uuid,
    pub table_number: Option<i32>,
    pub status: String,
    pub payment_status: String,
    pub notes: Option<String>,
    pub order_time: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderRow {
    pub fn into_order(
        self,
        pricing: PricingService,
        lines: Vec<OrderLine>,
        feedback: Vec<Feedback>,
    ) -> Result<Order, DomainError> {
        Ok(Order::from_record(OrderRecord {
            id: self.id,
            customer_id: self.customer_id,
            table_number: self.table_number,
            order_time: self.order_time,
            status: self.status.parse()?,
            payment_status: self.payment_status.parse()?,
            notes: self.notes,
            pricing,
            lines,
            feedback,
        }))
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = orders)]
#[diesel(treat_none_as_null = true)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub pricing_service_id: Uuid,
    pub table_number: Option<i32>,
    pub status: String,
    pub payment_status: String,
    pub notes: Option<String>,
    pub order_time: DateTime<Utc>,
}

impl NewOrderRow {
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id(),
            customer_id: order.customer_id(),
            pricing_service_id: order.pricing().id(),
            table_number: order.table_number(),
            status: order.status().to_string(),
            payment_status: order.payment_status().to_string(),
            notes: order.notes().map(str::to_string),
            order_time: order.order_time(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_lines)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderLineRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub created_at: DateTime<Utc>,
}

impl OrderLineRow {
    pub fn into_line(self) -> OrderLine {
        OrderLine::rehydrate(self.id, self.product_id, self.quantity, self.unit_price)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_lines)]
pub struct NewOrderLineRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl NewOrderLineRow {
    pub fn from_line(order_id: Uuid, line: &OrderLine) -> Self {
        Self {
            id: line.id(),
            order_id,
            product_id: line.product_id(),
            quantity: line.quantity(),
            unit_price: line.unit_price().clone(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = feedback)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FeedbackRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub description: String,
    pub submitted_at: DateTime<Utc>,
}

impl FeedbackRow {
    pub fn into_feedback(self) -> Feedback {
        Feedback::rehydrate(self.id, self.customer_id, self.description, self.submitted_at)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = feedback)]
pub struct NewFeedbackRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub description: String,
    pub submitted_at: DateTime<Utc>,
}

impl NewFeedbackRow {
    pub fn from_feedback(order_id: Uuid, feedback: &Feedback) -> Self {
        Self {
            id: feedback.id(),
            order_id,
            customer_id: feedback.customer_id(),
            description: feedback.description().to_string(),
            submitted_at: feedback.submitted_at(),
        }
    }
}
