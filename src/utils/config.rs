use std::env;
use url::Url;

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_url: String,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let config = Config {
            catalog_url: env::var("CATALOG_URL").unwrap_or(DEFAULT_CATALOG_URL.to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or("info".to_string()),
            environment: env::var("APP_ENV").unwrap_or("development".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Override the catalog endpoint, e.g. from a command line flag.
    pub fn with_catalog_url(mut self, catalog_url: Option<String>) -> anyhow::Result<Self> {
        if let Some(catalog_url) = catalog_url {
            self.catalog_url = catalog_url;
            self.validate()?;
        }
        Ok(self)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.catalog_url.is_empty() {
            return Err(anyhow::anyhow!("CATALOG_URL is not set"));
        }

        self.catalog_endpoint()?;
        Ok(())
    }

    pub fn catalog_endpoint(&self) -> anyhow::Result<Url> {
        let url = Url::parse(&self.catalog_url)
            .map_err(|e| anyhow::anyhow!("CATALOG_URL is not a valid URL: {}", e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "CATALOG_URL must start with 'http://' or 'https://'"
            ));
        }
        Ok(url)
    }
}
