use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::models::product::{ProductError, ProductRecord};

/// Every variant is a "fetch failed"; the split only sharpens the log line.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Fetch failed: request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Fetch failed: unexpected status {0}")]
    UnexpectedStatus(StatusCode),
    #[error("Fetch failed: malformed response: {0}")]
    DecodeError(#[from] serde_json::Error),
    #[error("Fetch failed: invalid product record: {0}")]
    InvalidRecord(#[from] ProductError),
}

/// Source of raw product records
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_records(&self) -> Result<Vec<ProductRecord>, CatalogError>;
}

/// Plain GET against a product listing endpoint. No query parameters, no
/// auth headers, no retry.
pub struct HttpCatalogSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpCatalogSource {
    pub fn new(endpoint: Url) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_records(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        tracing::debug!("GET {}", self.endpoint);

        let response = self.client.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus(status));
        }

        let body = response.text().await?;
        let records: Vec<ProductRecord> = serde_json::from_str(&body)?;

        tracing::debug!("Received {} product records", records.len());
        Ok(records)
    }
}
