use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::errors::DomainError;
use super::money;
use super::{non_blank, non_blank_opt};

const FOOD_BASE_MINUTES: f64 = 5.0;
const MINUTES_PER_INGREDIENT: f64 = 4.0;
const SAUCE_EXTRA_MINUTES: f64 = 1.0;
const DRINK_BASE_MINUTES: f64 = 0.5;
const ALCOHOL_EXTRA_MINUTES: f64 = 1.0;
const CARBONATION_EXTRA_MINUTES: f64 = 0.5;
const DESSERT_BASE_MINUTES: f64 = 5.0;
const DESSERT_MINUTES_PER_SUGAR_GRAM: f64 = 0.01;
const COCKTAIL_BASE_MINUTES: f64 = 5.0;
const COCKTAIL_MINUTES_PER_SUGAR_GRAM: f64 = 0.2;

const NON_VEGETARIAN: [&str; 7] = ["meat", "chicken", "fish", "bacon", "ham", "pork", "beef"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IceCreamFlavor {
    Vanilla,
    Chocolate,
    Strawberry,
}

impl IceCreamFlavor {
    pub const fn as_str(self) -> &'static str {
        match self {
            IceCreamFlavor::Vanilla => "VANILLA",
            IceCreamFlavor::Chocolate => "CHOCOLATE",
            IceCreamFlavor::Strawberry => "STRAWBERRY",
        }
    }
}

impl fmt::Display for IceCreamFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IceCreamFlavor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VANILLA" => Ok(IceCreamFlavor::Vanilla),
            "CHOCOLATE" => Ok(IceCreamFlavor::Chocolate),
            "STRAWBERRY" => Ok(IceCreamFlavor::Strawberry),
            _ => Err(DomainError::InvalidArgument(format!(
                "unknown ice cream flavor '{s}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PNG" => Ok(ImageFormat::Png),
            "JPG" | "JPEG" => Ok(ImageFormat::Jpeg),
            _ => Err(DomainError::InvalidArgument(format!(
                "unknown image format '{s}'"
            ))),
        }
    }
}

/// A stored picture of a product. At most one image per product is flagged as
/// the menu preview.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    id: Uuid,
    format: ImageFormat,
    preview: bool,
    data: Vec<u8>,
}

impl Image {
    pub fn new(format: ImageFormat, preview: bool, data: Vec<u8>) -> Result<Self, DomainError> {
        if data.is_empty() {
            return Err(DomainError::InvalidArgument(
                "image data must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            format,
            preview,
            data,
        })
    }

    pub(crate) fn rehydrate(id: Uuid, format: ImageFormat, preview: bool, data: Vec<u8>) -> Self {
        Self {
            id,
            format,
            preview,
            data,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A menu grouping such as "Pizza" or "Hot drinks".
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    id: Uuid,
    name: String,
}

impl Category {
    pub fn new(name: &str) -> Result<Self, DomainError> {
        non_blank(name, "category name")?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
        })
    }

    pub(crate) fn rehydrate(id: Uuid, name: String) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: &str) -> Result<(), DomainError> {
        non_blank(name, "category name")?;
        self.name = name.to_string();
        Ok(())
    }
}

/// What distinguishes one kind of menu item from another, including the
/// inputs to its preparation-time estimate.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductKind {
    Food {
        ingredients: Vec<String>,
    },
    Drink {
        alcohol_percent: f64,
        carbonated: bool,
    },
    Dessert {
        sugar_per_gram: f64,
    },
    MilkCocktail {
        alcohol_percent: f64,
        carbonated: bool,
        ice_cream: IceCreamFlavor,
        sugar_per_gram: f64,
    },
}

impl ProductKind {
    pub const fn token(&self) -> &'static str {
        match self {
            ProductKind::Food { .. } => "FOOD",
            ProductKind::Drink { .. } => "DRINK",
            ProductKind::Dessert { .. } => "DESSERT",
            ProductKind::MilkCocktail { .. } => "MILK_COCKTAIL",
        }
    }
}

/// A menu item. The kind carries the per-variant data; categories are held as
/// ids and resolved through the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: BigDecimal,
    calories: i32,
    weight_grams: f64,
    kind: ProductKind,
    category_ids: BTreeSet<Uuid>,
    images: Vec<Image>,
}

impl Product {
    pub fn food(
        name: &str,
        description: Option<&str>,
        price: BigDecimal,
        calories: i32,
        weight_grams: f64,
        ingredients: Vec<String>,
    ) -> Result<Self, DomainError> {
        if ingredients.is_empty() {
            return Err(DomainError::InvalidArgument(
                "food must have at least one ingredient".to_string(),
            ));
        }
        for ingredient in &ingredients {
            non_blank(ingredient, "ingredient")?;
        }
        Self::build(
            name,
            description,
            price,
            calories,
            weight_grams,
            ProductKind::Food { ingredients },
        )
    }

    pub fn drink(
        name: &str,
        description: Option<&str>,
        price: BigDecimal,
        calories: i32,
        weight_grams: f64,
        alcohol_percent: f64,
        carbonated: bool,
    ) -> Result<Self, DomainError> {
        check_alcohol(alcohol_percent)?;
        Self::build(
            name,
            description,
            price,
            calories,
            weight_grams,
            ProductKind::Drink {
                alcohol_percent,
                carbonated,
            },
        )
    }

    pub fn dessert(
        name: &str,
        description: Option<&str>,
        price: BigDecimal,
        calories: i32,
        weight_grams: f64,
        sugar_per_gram: f64,
    ) -> Result<Self, DomainError> {
        check_sugar(sugar_per_gram)?;
        Self::build(
            name,
            description,
            price,
            calories,
            weight_grams,
            ProductKind::Dessert { sugar_per_gram },
        )
    }

    pub fn milk_cocktail(
        name: &str,
        description: Option<&str>,
        price: BigDecimal,
        calories: i32,
        weight_grams: f64,
        alcohol_percent: f64,
        carbonated: bool,
        ice_cream: IceCreamFlavor,
        sugar_per_gram: f64,
    ) -> Result<Self, DomainError> {
        check_alcohol(alcohol_percent)?;
        check_sugar(sugar_per_gram)?;
        Self::build(
            name,
            description,
            price,
            calories,
            weight_grams,
            ProductKind::MilkCocktail {
                alcohol_percent,
                carbonated,
                ice_cream,
                sugar_per_gram,
            },
        )
    }

    fn build(
        name: &str,
        description: Option<&str>,
        price: BigDecimal,
        calories: i32,
        weight_grams: f64,
        kind: ProductKind,
    ) -> Result<Self, DomainError> {
        non_blank(name, "product name")?;
        non_blank_opt(description, "product description")?;
        if price < money::zero() {
            return Err(DomainError::InvalidArgument(format!(
                "product price must not be negative, got {price}"
            )));
        }
        if calories < 1 {
            return Err(DomainError::InvalidArgument(format!(
                "calories must be at least 1, got {calories}"
            )));
        }
        if weight_grams < 1.0 {
            return Err(DomainError::InvalidArgument(format!(
                "weight must be at least 1 gram, got {weight_grams}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.map(str::to_string),
            price,
            calories,
            weight_grams,
            kind,
            category_ids: BTreeSet::new(),
            images: Vec::new(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn rehydrate(
        id: Uuid,
        name: String,
        description: Option<String>,
        price: BigDecimal,
        calories: i32,
        weight_grams: f64,
        kind: ProductKind,
        category_ids: BTreeSet<Uuid>,
        images: Vec<Image>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price,
            calories,
            weight_grams,
            kind,
            category_ids,
            images,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> &BigDecimal {
        &self.price
    }

    pub fn calories(&self) -> i32 {
        self.calories
    }

    pub fn weight_grams(&self) -> f64 {
        self.weight_grams
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    pub fn category_ids(&self) -> &BTreeSet<Uuid> {
        &self.category_ids
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn preview_image(&self) -> Option<&Image> {
        self.images.iter().find(|i| i.is_preview())
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), DomainError> {
        non_blank(name, "product name")?;
        self.name = name.to_string();
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<&str>) -> Result<(), DomainError> {
        non_blank_opt(description, "product description")?;
        self.description = description.map(str::to_string);
        Ok(())
    }

    pub fn set_price(&mut self, price: BigDecimal) -> Result<(), DomainError> {
        if price < money::zero() {
            return Err(DomainError::InvalidArgument(format!(
                "product price must not be negative, got {price}"
            )));
        }
        self.price = price;
        Ok(())
    }

    pub fn add_category(&mut self, category_id: Uuid) {
        self.category_ids.insert(category_id);
    }

    pub fn remove_category(&mut self, category_id: Uuid) {
        self.category_ids.remove(&category_id);
    }

    pub fn set_categories<I: IntoIterator<Item = Uuid>>(&mut self, category_ids: I) {
        self.category_ids = category_ids.into_iter().collect();
    }

    pub fn add_image(&mut self, image: Image) -> Result<(), DomainError> {
        if image.is_preview() && self.preview_image().is_some() {
            return Err(DomainError::InvalidArgument(
                "product already has a preview image".to_string(),
            ));
        }
        self.images.push(image);
        Ok(())
    }

    pub fn remove_image(&mut self, image_id: Uuid) -> Result<(), DomainError> {
        let before = self.images.len();
        self.images.retain(|i| i.id() != image_id);
        if self.images.len() == before {
            return Err(DomainError::InvalidArgument(format!(
                "no image {image_id} on this product"
            )));
        }
        Ok(())
    }

    /// Kitchen estimate in minutes, driven by what kind of product this is.
    pub fn preparation_minutes(&self) -> f64 {
        match &self.kind {
            ProductKind::Food { ingredients } => {
                let mut minutes =
                    FOOD_BASE_MINUTES + MINUTES_PER_INGREDIENT * ingredients.len() as f64;
                if self.has_ingredient("sauce") {
                    minutes += SAUCE_EXTRA_MINUTES;
                }
                minutes
            }
            ProductKind::Drink {
                alcohol_percent,
                carbonated,
            } => {
                let mut minutes = DRINK_BASE_MINUTES;
                if *alcohol_percent > 0.0 {
                    minutes += ALCOHOL_EXTRA_MINUTES;
                }
                if *carbonated {
                    minutes += CARBONATION_EXTRA_MINUTES;
                }
                minutes
            }
            ProductKind::Dessert { sugar_per_gram } => {
                DESSERT_BASE_MINUTES
                    + sugar_per_gram * self.weight_grams * DESSERT_MINUTES_PER_SUGAR_GRAM
            }
            ProductKind::MilkCocktail { sugar_per_gram, .. } => {
                COCKTAIL_BASE_MINUTES
                    + sugar_per_gram * self.weight_grams * COCKTAIL_MINUTES_PER_SUGAR_GRAM
            }
        }
    }

    /// Ingredient check by exact name, case-insensitive. Only foods carry an
    /// ingredient list.
    pub fn has_ingredient(&self, ingredient: &str) -> bool {
        match &self.kind {
            ProductKind::Food { ingredients } => ingredients
                .iter()
                .any(|i| i.eq_ignore_ascii_case(ingredient)),
            _ => false,
        }
    }

    /// A food is vegetarian when none of its ingredients name a meat. Other
    /// kinds are vegetarian by definition here.
    pub fn is_vegetarian(&self) -> bool {
        match &self.kind {
            ProductKind::Food { ingredients } => ingredients.iter().all(|i| {
                NON_VEGETARIAN
                    .iter()
                    .all(|meat| !i.eq_ignore_ascii_case(meat))
            }),
            _ => true,
        }
    }
}

fn check_alcohol(alcohol_percent: f64) -> Result<(), DomainError> {
    if alcohol_percent < 0.0 {
        return Err(DomainError::InvalidArgument(format!(
            "alcohol percentage must not be negative, got {alcohol_percent}"
        )));
    }
    Ok(())
}

fn check_sugar(sugar_per_gram: f64) -> Result<(), DomainError> {
    if sugar_per_gram < 0.0 {
        return Err(DomainError::InvalidArgument(format!(
            "sugar per gram must not be negative, got {sugar_per_gram}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn margherita() -> Product {
        Product::food(
            "Margherita",
            Some("Classic pizza"),
            price("7.50"),
            850,
            450.0,
            vec!["dough".into(), "tomato".into(), "mozzarella".into()],
        )
        .unwrap()
    }

    #[test]
    fn food_preparation_scales_with_ingredients() {
        assert_close(margherita().preparation_minutes(), 17.0);
    }

    #[test]
    fn sauce_adds_a_minute_regardless_of_case() {
        let pasta = Product::food(
            "Carbonara",
            None,
            price("9.00"),
            900,
            380.0,
            vec!["pasta".into(), "Sauce".into()],
        )
        .unwrap();

        assert_close(pasta.preparation_minutes(), 14.0);
        assert!(pasta.has_ingredient("SAUCE"));
    }

    #[test]
    fn drink_preparation_adds_alcohol_and_carbonation_time() {
        let still = Product::drink("Water", None, price("1.50"), 1, 500.0, 0.0, false).unwrap();
        let beer = Product::drink("Lager", None, price("4.00"), 150, 500.0, 5.2, true).unwrap();

        assert_close(still.preparation_minutes(), 0.5);
        assert_close(beer.preparation_minutes(), 2.0);
    }

    #[test]
    fn dessert_preparation_follows_total_sugar() {
        let cake = Product::dessert("Cheesecake", None, price("5.50"), 420, 200.0, 0.5).unwrap();
        // 5.0 + 0.5 * 200 * 0.01
        assert_close(cake.preparation_minutes(), 6.0);
    }

    #[test]
    fn milk_cocktail_preparation_weighs_sugar_heavier() {
        let shake = Product::milk_cocktail(
            "Strawberry shake",
            None,
            price("4.50"),
            320,
            300.0,
            0.0,
            false,
            IceCreamFlavor::Strawberry,
            0.1,
        )
        .unwrap();
        // 5.0 + 0.1 * 300 * 0.2
        assert_close(shake.preparation_minutes(), 11.0);
    }

    #[test]
    fn vegetarian_check_matches_whole_ingredient_names() {
        assert!(margherita().is_vegetarian());

        let burger = Product::food(
            "Burger",
            None,
            price("8.00"),
            950,
            300.0,
            vec!["bun".into(), "Beef".into(), "onion".into()],
        )
        .unwrap();
        assert!(!burger.is_vegetarian());
    }

    #[test]
    fn drinks_are_trivially_vegetarian_and_ingredient_free() {
        let cola = Product::drink("Cola", None, price("2.50"), 180, 330.0, 0.0, true).unwrap();

        assert!(cola.is_vegetarian());
        assert!(!cola.has_ingredient("sauce"));
    }

    #[test]
    fn food_requires_at_least_one_real_ingredient() {
        let empty = Product::food("Mystery", None, price("5.00"), 100, 100.0, vec![]);
        assert!(matches!(empty, Err(DomainError::InvalidArgument(_))));

        let blank = Product::food("Mystery", None, price("5.00"), 100, 100.0, vec!["  ".into()]);
        assert!(matches!(blank, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn common_field_validation() {
        assert!(Product::drink(" ", None, price("1.00"), 10, 100.0, 0.0, false).is_err());
        assert!(Product::drink("Cola", Some("  "), price("1.00"), 10, 100.0, 0.0, false).is_err());
        assert!(Product::drink("Cola", None, price("-1.00"), 10, 100.0, 0.0, false).is_err());
        assert!(Product::drink("Cola", None, price("1.00"), 0, 100.0, 0.0, false).is_err());
        assert!(Product::drink("Cola", None, price("1.00"), 10, 0.5, 0.0, false).is_err());
        assert!(Product::drink("Cola", None, price("1.00"), 10, 100.0, -0.1, false).is_err());
        assert!(Product::dessert("Cake", None, price("1.00"), 10, 100.0, -0.5).is_err());
    }

    #[test]
    fn price_updates_reject_negative_amounts() {
        let mut product = margherita();

        assert!(product.set_price(price("-2.00")).is_err());
        assert_eq!(*product.price(), price("7.50"));

        product.set_price(price("8.25")).unwrap();
        assert_eq!(*product.price(), price("8.25"));
    }

    #[test]
    fn profile_setters_revalidate() {
        let mut product = margherita();

        assert!(product.set_name("  ").is_err());
        assert!(product.set_description(Some("")).is_err());

        product.set_name("Margherita DOP").unwrap();
        product.set_description(None).unwrap();
        assert_eq!(product.name(), "Margherita DOP");
        assert_eq!(product.description(), None);
    }

    #[test]
    fn only_one_preview_image_is_allowed() {
        let mut product = margherita();
        product
            .add_image(Image::new(ImageFormat::Png, true, vec![1, 2, 3]).unwrap())
            .unwrap();
        product
            .add_image(Image::new(ImageFormat::Jpeg, false, vec![4, 5]).unwrap())
            .unwrap();

        let second_preview = Image::new(ImageFormat::Png, true, vec![6]).unwrap();
        assert!(matches!(
            product.add_image(second_preview),
            Err(DomainError::InvalidArgument(_))
        ));
        assert_eq!(product.images().len(), 2);
        assert_eq!(product.preview_image().map(Image::format), Some(ImageFormat::Png));
    }

    #[test]
    fn removing_an_unknown_image_fails() {
        let mut product = margherita();
        let image = Image::new(ImageFormat::Png, false, vec![1]).unwrap();
        let image_id = image.id();
        product.add_image(image).unwrap();

        product.remove_image(image_id).unwrap();
        assert!(product.images().is_empty());

        assert!(matches!(
            product.remove_image(image_id),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn image_data_must_not_be_empty() {
        let result = Image::new(ImageFormat::Png, false, vec![]);
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn image_format_tokens_cover_the_jpg_alias() {
        assert_eq!("PNG".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!("JPG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert_eq!("JPEG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert!("GIF".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn category_assignment_is_a_set() {
        let mut product = margherita();
        let pizza = Uuid::new_v4();
        let vegetarian = Uuid::new_v4();

        product.add_category(pizza);
        product.add_category(pizza);
        product.add_category(vegetarian);
        assert_eq!(product.category_ids().len(), 2);

        product.remove_category(pizza);
        assert!(!product.category_ids().contains(&pizza));

        product.set_categories([vegetarian]);
        assert_eq!(product.category_ids().len(), 1);
    }

    #[test]
    fn category_names_must_not_be_blank() {
        assert!(Category::new("  ").is_err());

        let mut category = Category::new("Pizza").unwrap();
        assert!(category.rename("").is_err());
        category.rename("Oven dishes").unwrap();
        assert_eq!(category.name(), "Oven dishes");
    }
}
