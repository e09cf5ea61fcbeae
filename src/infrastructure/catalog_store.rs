use std::collections::{BTreeSet, HashMap};

use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::ports::CatalogStore;
use crate::domain::{Category, DomainError, Image, Product};
use crate::schema::{categories, product_categories, product_images, products};

use super::missing_after_save;
use super::models::{
    CategoryRow, ImageRow, NewCategoryRow, NewImageRow, NewProductCategoryRow, NewProductRow,
    ProductRow,
};

pub struct DieselCatalogStore {
    pool: DbPool,
}

impl DieselCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for DieselCatalogStore {
    /// Upsert the product row and replace its category links and images in
    /// one transaction.
    fn save_product(&self, product: &Product) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = NewProductRow::from_product(product);
            diesel::insert_into(products::table)
                .values(&row)
                .on_conflict(products::id)
                .do_update()
                .set(&row)
                .execute(conn)?;

            diesel::delete(
                product_categories::table
                    .filter(product_categories::product_id.eq(product.id())),
            )
            .execute(conn)?;
            let links: Vec<NewProductCategoryRow> = product
                .category_ids()
                .iter()
                .map(|&category_id| NewProductCategoryRow {
                    product_id: product.id(),
                    category_id,
                })
                .collect();
            if !links.is_empty() {
                diesel::insert_into(product_categories::table)
                    .values(&links)
                    .execute(conn)?;
            }

            diesel::delete(
                product_images::table.filter(product_images::product_id.eq(product.id())),
            )
            .execute(conn)?;
            let images: Vec<NewImageRow> = product
                .images()
                .iter()
                .map(|image| NewImageRow::from_image(product.id(), image))
                .collect();
            if !images.is_empty() {
                diesel::insert_into(product_images::table)
                    .values(&images)
                    .execute(conn)?;
            }

            Ok(())
        })?;

        self.find_product(product.id())?
            .ok_or_else(|| missing_after_save("product", product.id()))
    }

    fn find_product(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .filter(products::id.eq(id))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let category_ids: BTreeSet<Uuid> = product_categories::table
            .filter(product_categories::product_id.eq(id))
            .select(product_categories::category_id)
            .load::<Uuid>(&mut conn)?
            .into_iter()
            .collect();

        let images = product_images::table
            .filter(product_images::product_id.eq(id))
            .order(product_images::id.asc())
            .select(ImageRow::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(ImageRow::into_image)
            .collect::<Result<Vec<Image>, DomainError>>()?;

        Ok(Some(row.into_product(category_ids, images)?))
    }

    fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .order(products::name.asc())
            .then_order_by(products::id.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let image_rows: Vec<ImageRow> = ImageRow::belonging_to(&rows)
            .order(product_images::id.asc())
            .select(ImageRow::as_select())
            .load(&mut conn)?;
        let images_per_product = image_rows.grouped_by(&rows);

        let product_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let links: Vec<(Uuid, Uuid)> = product_categories::table
            .filter(product_categories::product_id.eq_any(&product_ids))
            .load(&mut conn)?;
        let mut categories_per_product: HashMap<Uuid, BTreeSet<Uuid>> = HashMap::new();
        for (product_id, category_id) in links {
            categories_per_product
                .entry(product_id)
                .or_default()
                .insert(category_id);
        }

        rows.into_iter()
            .zip(images_per_product)
            .map(|(row, image_rows)| {
                let category_ids = categories_per_product.remove(&row.id).unwrap_or_default();
                let images = image_rows
                    .into_iter()
                    .map(ImageRow::into_image)
                    .collect::<Result<Vec<Image>, DomainError>>()?;
                row.into_product(category_ids, images)
            })
            .collect()
    }

    fn delete_product(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        // Category links and images cascade; historical order lines keep
        // their product_id as a plain reference.
        let deleted = diesel::delete(products::table.filter(products::id.eq(id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    fn save_category(&self, category: &Category) -> Result<Category, DomainError> {
        let mut conn = self.pool.get()?;

        let row = NewCategoryRow::from_category(category);
        diesel::insert_into(categories::table)
            .values(&row)
            .on_conflict(categories::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)?;

        self.find_category(category.id())?
            .ok_or_else(|| missing_after_save("category", category.id()))
    }

    fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = categories::table
            .filter(categories::id.eq(id))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(CategoryRow::into_category))
    }

    fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = categories::table
            .order(categories::name.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }
}
