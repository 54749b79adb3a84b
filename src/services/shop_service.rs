use bigdecimal::BigDecimal;
use regex::Regex;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    models::{
        basket::Basket,
        product::{Catalog, ProductId},
    },
    services::{
        catalog_service::{CatalogFetch, CatalogService},
        invoice_service::InvoiceCalculator,
    },
};

#[derive(Error, Debug, PartialEq)]
pub enum ShopError {
    #[error("Could not fetch the product catalog")]
    FetchFailed,

    #[error("Product {0} is not in the catalog")]
    UnknownProduct(ProductId),
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid basket action '{0}': expected +ID, -ID, +IDxN or -IDxN")]
pub struct ActionParseError(pub String);

/// A scripted basket change: `+3` selects product 3, `-3x2` removes it twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasketAction {
    Select { id: ProductId, times: u32 },
    Remove { id: ProductId, times: u32 },
}

lazy_static::lazy_static! {
    static ref ACTION_REGEX: Regex = Regex::new(r"^([+-])(\d+)(?:[xX](\d+))?$").unwrap();
}

impl FromStr for BasketAction {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ActionParseError(s.to_string());
        let captures = ACTION_REGEX.captures(s.trim()).ok_or_else(invalid)?;

        let id = captures[2].parse::<u64>().map_err(|_| invalid())?;
        let times = match captures.get(3) {
            Some(m) => m.as_str().parse::<u32>().map_err(|_| invalid())?,
            None => 1,
        };
        if times == 0 {
            return Err(invalid());
        }

        let id = ProductId(id);
        Ok(match &captures[1] {
            "+" => BasketAction::Select { id, times },
            _ => BasketAction::Remove { id, times },
        })
    }
}

/// One shopping session: the fetched catalog, the basket built against it,
/// and the memoized invoice total. Every view action lands here.
pub struct ShopService {
    catalog_service: CatalogService,
    catalog: Catalog,
    basket: Basket,
    invoice: InvoiceCalculator,
}

impl ShopService {
    pub fn new(catalog_service: CatalogService) -> Self {
        Self {
            catalog_service,
            catalog: Catalog::new(),
            basket: Basket::new(),
            invoice: InvoiceCalculator::new(),
        }
    }

    /// Fetch the catalog and replace the current one. On failure the current
    /// catalog (empty before the first successful fetch) is kept.
    pub async fn trigger_fetch(&mut self) -> Result<usize, ShopError> {
        match self.catalog_service.fetch_products().await {
            CatalogFetch::Loaded(products) => {
                let count = products.len();
                self.catalog.replace(products);
                info!("Catalog replaced with {} products", count);
                Ok(count)
            }
            CatalogFetch::Failed => {
                warn!(
                    "Keeping current catalog of {} products after failed fetch",
                    self.catalog.len()
                );
                Err(ShopError::FetchFailed)
            }
        }
    }

    pub fn select(&mut self, product_id: ProductId) -> Result<u32, ShopError> {
        let product = self
            .catalog
            .find(product_id)
            .ok_or(ShopError::UnknownProduct(product_id))?;
        Ok(self.basket.select(product))
    }

    pub fn remove(&mut self, product_id: ProductId) -> u32 {
        self.basket.remove(product_id)
    }

    /// Apply `action` and return the resulting quantity.
    pub fn apply(&mut self, action: BasketAction) -> Result<u32, ShopError> {
        match action {
            BasketAction::Select { id, times } => {
                let mut quantity = self.basket.quantity_of(id);
                for _ in 0..times {
                    quantity = self.select(id)?;
                }
                Ok(quantity)
            }
            BasketAction::Remove { id, times } => {
                let mut quantity = self.basket.quantity_of(id);
                for _ in 0..times {
                    quantity = self.remove(id);
                }
                Ok(quantity)
            }
        }
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.basket.quantity_of(product_id)
    }

    pub fn invoice_total(&mut self) -> BigDecimal {
        self.invoice.total(&self.catalog, &self.basket)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn invoice_recomputations(&self) -> u64 {
        self.invoice.recomputations()
    }
}
