use crate::domain::model::BusinessProfile;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where raw price-list bytes come from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable location, used in logs and load errors.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<u8>>;
}

pub trait ConfigProvider: Send + Sync {
    fn discount_rate(&self) -> f64;
    fn catalog_location(&self) -> &str;
    fn request_timeout_seconds(&self) -> u64;
    fn business_profile(&self) -> BusinessProfile;
}
