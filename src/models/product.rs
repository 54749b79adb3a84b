use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Stable catalog identifier. Its `Display` form is the key used when
/// quantities are reported per product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

impl FromStr for ProductId {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ProductId)
            .map_err(|_| ProductError::InvalidId(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid product id: {0}")]
    InvalidId(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

// wire dto, exactly as the catalog endpoint returns it
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductRecord {
    pub id: u64,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    #[validate(custom = "validate_title")]
    pub title: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image: String,

    #[serde(default)]
    pub rating: Option<Rating>,
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("Title is required"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub image: String,
    pub price: BigDecimal,
    pub title: String,
    pub description: String,
}

impl Product {
    /// Builds a product from a decimal price literal such as `"10.005"`.
    pub fn new(id: u64, title: &str, price: &str) -> Result<Self, ProductError> {
        let price = parse_price(price)?;
        Ok(Self {
            id: ProductId(id),
            image: String::new(),
            price,
            title: title.to_string(),
            description: String::new(),
        })
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = ProductError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        record.validate()?;

        // f64's Display is the shortest round-tripping form, so 10.005 stays 10.005
        let price = parse_price(&record.price.to_string())?;

        Ok(Self {
            id: ProductId(record.id),
            image: record.image,
            price,
            title: record.title,
            description: record.description,
        })
    }
}

fn parse_price(raw: &str) -> Result<BigDecimal, ProductError> {
    let price =
        BigDecimal::from_str(raw).map_err(|_| ProductError::InvalidPrice(raw.to_string()))?;
    if price < BigDecimal::from(0) {
        return Err(ProductError::InvalidPrice(raw.to_string()));
    }
    Ok(price)
}

/// Reduced projection of a product kept in the basket's selection list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedProductInfo {
    pub id: ProductId,
    pub price: BigDecimal,
    pub title: String,
}

impl From<&Product> for SelectedProductInfo {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            price: product.price.clone(),
            title: product.title.clone(),
        }
    }
}

/// The product list from the most recent successful fetch.
///
/// Each `replace` swaps the whole list and bumps the revision, which is what
/// derived values (the invoice total) key their caches on.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    revision: u64,
    fetched_at: Option<DateTime<Utc>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
        self.revision += 1;
        self.fetched_at = Some(Utc::now());
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }
}
