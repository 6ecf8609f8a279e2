use crate::domain::ports::CatalogSource;
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub struct HttpCatalogSource {
    url: String,
    client: Client,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| BookingError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Making catalog request to: {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| BookingError::catalog_load(&self.url, e))?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);
        if !status.is_success() {
            return Err(BookingError::catalog_load(
                &self.url,
                format!("server responded with {}", status),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| BookingError::catalog_load(&self.url, e))?;
        Ok(body.to_vec())
    }
}
