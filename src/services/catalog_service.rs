use std::sync::Arc;
use tracing::{error, info};

use crate::{
    catalog::{CatalogError, CatalogSource},
    models::product::Product,
};

/// Result of a catalog fetch. Failures never escape as errors: they are
/// logged at the fetch boundary and reported as `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogFetch {
    Loaded(Vec<Product>),
    Failed,
}

impl CatalogFetch {
    pub fn is_failed(&self) -> bool {
        matches!(self, CatalogFetch::Failed)
    }
}

pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
}

impl CatalogService {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }

    /// Fetch and project the product list.
    pub async fn fetch_products(&self) -> CatalogFetch {
        match self.try_fetch_products().await {
            Ok(products) => {
                info!("Fetched {} products", products.len());
                CatalogFetch::Loaded(products)
            }
            Err(e) => {
                error!("Failed to fetch products: {}", e);
                CatalogFetch::Failed
            }
        }
    }

    async fn try_fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let records = self.source.fetch_records().await?;

        records
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(CatalogError::from)
    }
}
