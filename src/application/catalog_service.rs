use bigdecimal::BigDecimal;
use log::info;
use uuid::Uuid;

use crate::domain::ports::CatalogStore;
use crate::domain::{Category, DomainError, Image, Product};

/// Menu administration: products, categories, and product images.
pub struct CatalogService<S> {
    catalog: S,
}

impl<S: CatalogStore> CatalogService<S> {
    pub fn new(catalog: S) -> Self {
        Self { catalog }
    }

    /// Persist a newly built product, first checking that every category it
    /// references exists.
    pub fn add_product(&self, product: Product) -> Result<Product, DomainError> {
        self.check_categories(&product)?;
        let saved = self.catalog.save_product(&product)?;
        info!("product '{}' added to the menu", saved.name());
        Ok(saved)
    }

    pub fn find(&self, id: Uuid) -> Result<Product, DomainError> {
        self.load(id)
    }

    pub fn menu(&self) -> Result<Vec<Product>, DomainError> {
        self.catalog.list_products()
    }

    pub fn menu_for_category(&self, category_id: Uuid) -> Result<Vec<Product>, DomainError> {
        self.catalog
            .find_category(category_id)?
            .ok_or(DomainError::NotFound)?;
        let mut products = self.catalog.list_products()?;
        products.retain(|p| p.category_ids().contains(&category_id));
        Ok(products)
    }

    pub fn update_price(&self, id: Uuid, price: BigDecimal) -> Result<Product, DomainError> {
        let mut product = self.load(id)?;
        product.set_price(price)?;
        let saved = self.catalog.save_product(&product)?;
        info!("product '{}' repriced to {}", saved.name(), saved.price());
        Ok(saved)
    }

    pub fn update_details(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Product, DomainError> {
        let mut product = self.load(id)?;
        product.set_name(name)?;
        product.set_description(description)?;
        self.catalog.save_product(&product)
    }

    pub fn set_categories(
        &self,
        id: Uuid,
        category_ids: Vec<Uuid>,
    ) -> Result<Product, DomainError> {
        for category_id in &category_ids {
            self.catalog
                .find_category(*category_id)?
                .ok_or(DomainError::NotFound)?;
        }
        let mut product = self.load(id)?;
        product.set_categories(category_ids);
        self.catalog.save_product(&product)
    }

    pub fn attach_image(&self, id: Uuid, image: Image) -> Result<Product, DomainError> {
        let mut product = self.load(id)?;
        product.add_image(image)?;
        self.catalog.save_product(&product)
    }

    pub fn detach_image(&self, id: Uuid, image_id: Uuid) -> Result<Product, DomainError> {
        let mut product = self.load(id)?;
        product.remove_image(image_id)?;
        self.catalog.save_product(&product)
    }

    pub fn remove_product(&self, id: Uuid) -> Result<(), DomainError> {
        self.load(id)?;
        self.catalog.delete_product(id)?;
        info!("product {id} removed from the menu");
        Ok(())
    }

    pub fn create_category(&self, name: &str) -> Result<Category, DomainError> {
        let category = Category::new(name)?;
        self.catalog.save_category(&category)
    }

    pub fn rename_category(&self, id: Uuid, name: &str) -> Result<Category, DomainError> {
        let mut category = self
            .catalog
            .find_category(id)?
            .ok_or(DomainError::NotFound)?;
        category.rename(name)?;
        self.catalog.save_category(&category)
    }

    pub fn categories(&self) -> Result<Vec<Category>, DomainError> {
        self.catalog.list_categories()
    }

    fn check_categories(&self, product: &Product) -> Result<(), DomainError> {
        for category_id in product.category_ids() {
            self.catalog
                .find_category(*category_id)?
                .ok_or(DomainError::NotFound)?;
        }
        Ok(())
    }

    fn load(&self, id: Uuid) -> Result<Product, DomainError> {
        self.catalog.find_product(id)?.ok_or(DomainError::NotFound)
    }
}
