pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{AnyCatalogSource, FileCatalogSource, HttpCatalogSource};
pub use crate::core::booking::BookingContext;
pub use crate::core::loader::{CatalogFormat, CatalogLoader};
pub use crate::core::pricing::{build_catalog, Catalog};
pub use domain::model::{BusinessProfile, DestinationChannel};
pub use utils::error::{BookingError, Result};
