use std::collections::HashMap;

use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::ports::OrderStore;
use crate::domain::{DomainError, Order, OrderLine, PricingService};
use crate::schema::{feedback, order_lines, orders, pricing_services};

use super::missing_after_save;
use super::models::{
    FeedbackRow, NewFeedbackRow, NewOrderLineRow, NewOrderRow, OrderLineRow, OrderRow,
    PricingServiceRow,
};

pub struct DieselOrderStore {
    pool: DbPool,
}

impl DieselOrderStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderStore for DieselOrderStore {
    /// Upsert the order row and replace its lines and feedback in one
    /// transaction. The aggregate's validation checkpoint runs first; nothing
    /// is written when it fails.
    fn save(&self, order: &Order) -> Result<Order, DomainError> {
        order.validate()?;
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = NewOrderRow::from_order(order);
            diesel::insert_into(orders::table)
                .values(&row)
                .on_conflict(orders::id)
                .do_update()
                .set(&row)
                .execute(conn)?;

            diesel::delete(order_lines::table.filter(order_lines::order_id.eq(order.id())))
                .execute(conn)?;
            let line_rows: Vec<NewOrderLineRow> = order
                .lines()
                .iter()
                .map(|line| NewOrderLineRow::from_line(order.id(), line))
                .collect();
            if !line_rows.is_empty() {
                diesel::insert_into(order_lines::table)
                    .values(&line_rows)
                    .execute(conn)?;
            }

            diesel::delete(feedback::table.filter(feedback::order_id.eq(order.id())))
                .execute(conn)?;
            let feedback_rows: Vec<NewFeedbackRow> = order
                .feedback()
                .iter()
                .map(|entry| NewFeedbackRow::from_feedback(order.id(), entry))
                .collect();
            if !feedback_rows.is_empty() {
                diesel::insert_into(feedback::table)
                    .values(&feedback_rows)
                    .execute(conn)?;
            }

            Ok(())
        })?;

        self.find_by_id(order.id())?
            .ok_or_else(|| missing_after_save("order", order.id()))
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(load_orders(&mut conn, vec![row])?.pop())
    }

    fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        // Lines and feedback go with the order via ON DELETE CASCADE.
        let deleted = diesel::delete(orders::table.filter(orders::id.eq(id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .filter(orders::customer_id.eq(customer_id))
            .order(orders::order_time.desc())
            .select(OrderRow::as_select())
            .load(&mut conn)?;

        load_orders(&mut conn, rows)
    }

    fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .order(orders::order_time.desc())
            .select(OrderRow::as_select())
            .load(&mut conn)?;

        load_orders(&mut conn, rows)
    }

    fn find_lines_by_product(&self, product_id: Uuid) -> Result<Vec<OrderLine>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = order_lines::table
            .filter(order_lines::product_id.eq(product_id))
            .order(order_lines::created_at.asc())
            .then_order_by(order_lines::id.asc())
            .select(OrderLineRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(OrderLineRow::into_line).collect())
    }
}

/// Hydrate full aggregates for a page of order rows: one query each for the
/// referenced pricing services, the lines, and the feedback, then regroup per
/// order. Preserves the ordering of `rows`.
fn load_orders(conn: &mut PgConnection, rows: Vec<OrderRow>) -> Result<Vec<Order>, DomainError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let service_ids: Vec<Uuid> = rows.iter().map(|r| r.pricing_service_id).collect();
    let services: HashMap<Uuid, PricingService> = pricing_services::table
        .filter(pricing_services::id.eq_any(&service_ids))
        .select(PricingServiceRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|row| Ok((row.id, row.into_service()?)))
        .collect::<Result<_, DomainError>>()?;

    let line_rows: Vec<OrderLineRow> = OrderLineRow::belonging_to(&rows)
        .order(order_lines::created_at.asc())
        .then_order_by(order_lines::id.asc())
        .select(OrderLineRow::as_select())
        .load(conn)?;
    let feedback_rows: Vec<FeedbackRow> = FeedbackRow::belonging_to(&rows)
        .order(feedback::submitted_at.asc())
        .then_order_by(feedback::id.asc())
        .select(FeedbackRow::as_select())
        .load(conn)?;

    let lines_per_order = line_rows.grouped_by(&rows);
    let feedback_per_order = feedback_rows.grouped_by(&rows);

    rows.into_iter()
        .zip(lines_per_order)
        .zip(feedback_per_order)
        .map(|((row, line_rows), feedback_rows)| {
            let pricing = services
                .get(&row.pricing_service_id)
                .cloned()
                .ok_or_else(|| {
                    DomainError::Internal(format!(
                        "order {} references missing pricing service {}",
                        row.id, row.pricing_service_id
                    ))
                })?;
            row.into_order(
                pricing,
                line_rows.into_iter().map(OrderLineRow::into_line).collect(),
                feedback_rows
                    .into_iter()
                    .map(FeedbackRow::into_feedback)
                    .collect(),
            )
        })
        .collect()
}
