use crate::core::pricing::{build_catalog, Catalog};
use crate::domain::model::ServiceRecord;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{BookingError, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Csv,
}

impl CatalogFormat {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(BookingError::InvalidConfigValueError {
                field: "catalog.format".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: json, csv".to_string(),
            }),
        }
    }

    /// Guesses from the file extension, ignoring any query string. Defaults to JSON.
    pub fn from_location(location: &str) -> Self {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        match Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }

    pub fn parse(&self, bytes: &[u8]) -> std::result::Result<Vec<ServiceRecord>, String> {
        match self {
            Self::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
            Self::Csv => {
                let mut reader = csv::ReaderBuilder::new()
                    .trim(csv::Trim::All)
                    .from_reader(bytes);
                reader
                    .deserialize()
                    .collect::<std::result::Result<Vec<ServiceRecord>, _>>()
                    .map_err(|e| e.to_string())
            }
        }
    }
}

/// Fetches, parses and prices the catalog. All-or-nothing: any failure
/// surfaces as `CatalogLoadError` and no partial catalog is returned.
pub struct CatalogLoader<S: CatalogSource> {
    source: S,
    format: CatalogFormat,
}

impl<S: CatalogSource> CatalogLoader<S> {
    pub fn new(source: S, format: CatalogFormat) -> Self {
        Self { source, format }
    }

    pub async fn load(&self, discount_rate: f64) -> Result<Catalog> {
        let source_name = self.source.describe();
        tracing::info!("Loading catalog from {} ({:?})", source_name, self.format);

        let bytes = self.source.fetch().await.map_err(|e| match e {
            err @ BookingError::CatalogLoadError { .. } => err,
            other => BookingError::catalog_load(&source_name, other),
        })?;
        tracing::debug!("Fetched {} bytes", bytes.len());

        let records = self
            .format
            .parse(&bytes)
            .map_err(|message| BookingError::catalog_load(&source_name, message))?;
        tracing::debug!("Parsed {} records", records.len());

        let catalog = build_catalog(records, discount_rate).map_err(|e| match e {
            BookingError::CatalogLoadError { message, .. } => {
                BookingError::catalog_load(&source_name, message)
            }
            other => other,
        })?;

        if catalog.is_empty() {
            tracing::warn!("Catalog from {} contains no services", source_name);
        }
        tracing::info!(
            "Loaded {} services in {} categories",
            catalog.len(),
            catalog.groups().len()
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StaticSource(&'static str);

    #[async_trait]
    impl CatalogSource for StaticSource {
        fn describe(&self) -> String {
            "static".to_string()
        }

        async fn fetch(&self) -> Result<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    #[test]
    fn test_format_from_location() {
        assert_eq!(CatalogFormat::from_location("prices.json"), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_location("data/PRICES.CSV"), CatalogFormat::Csv);
        assert_eq!(
            CatalogFormat::from_location("https://example.com/prices.csv?v=2"),
            CatalogFormat::Csv
        );
        assert_eq!(CatalogFormat::from_location("prices"), CatalogFormat::Json);
        assert!(CatalogFormat::from_name("xml").is_err());
    }

    #[test]
    fn test_parse_csv() {
        let data = "category,service,old\nHair, Haircut ,100\nFace,Facial,200.5\n";
        let records = CatalogFormat::Csv.parse(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].service_name, "Haircut");
        assert_eq!(records[1].base_price, 200.5);
    }

    #[test]
    fn test_parse_json_missing_field() {
        let data = r#"[{"category": "Hair", "service": "Haircut"}]"#;
        assert!(CatalogFormat::Json.parse(data.as_bytes()).is_err());
    }

    #[tokio::test]
    async fn test_load_prices_catalog() {
        let loader = CatalogLoader::new(
            StaticSource(r#"[{"category": "Hair", "service": "Haircut", "old": 100}]"#),
            CatalogFormat::Json,
        );
        let catalog = loader.load(0.10).await.unwrap();
        assert_eq!(catalog.find("Haircut").unwrap().discounted_price, 90);
    }

    #[tokio::test]
    async fn test_load_reports_source_on_parse_failure() {
        let loader = CatalogLoader::new(StaticSource("not json"), CatalogFormat::Json);
        match loader.load(0.10).await {
            Err(BookingError::CatalogLoadError { source_name, .. }) => {
                assert_eq!(source_name, "static")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
