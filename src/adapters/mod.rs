// Adapters layer: concrete catalog sources (local file, http) behind the CatalogSource port.

pub mod file;
pub mod http;

pub use file::FileCatalogSource;
pub use http::HttpCatalogSource;

use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Either source, picked from the configured location.
pub enum AnyCatalogSource {
    File(FileCatalogSource),
    Http(HttpCatalogSource),
}

impl AnyCatalogSource {
    /// `http://` and `https://` locations are fetched over the network, anything else is a path.
    pub fn from_location(location: &str, timeout_seconds: u64) -> Result<Self> {
        let lowered = location.trim().to_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            Ok(Self::Http(HttpCatalogSource::new(location.trim(), timeout_seconds)?))
        } else {
            Ok(Self::File(FileCatalogSource::new(location.trim())))
        }
    }
}

#[async_trait]
impl CatalogSource for AnyCatalogSource {
    fn describe(&self) -> String {
        match self {
            Self::File(source) => source.describe(),
            Self::Http(source) => source.describe(),
        }
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            Self::File(source) => source.fetch().await,
            Self::Http(source) => source.fetch().await,
        }
    }
}
