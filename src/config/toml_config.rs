use crate::core::loader::CatalogFormat;
use crate::core::message::MAX_URL_LENGTH;
use crate::domain::model::BusinessProfile;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{
    validate_digits, validate_non_empty_string, validate_path, validate_range, validate_url,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub business: BusinessConfig,
    pub offer: OfferConfig,
    pub catalog: CatalogConfig,
    pub messaging: MessagingConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessConfig {
    pub name: String,
    pub currency_code: String,
    pub location_label: String,
    pub hours_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferConfig {
    pub name: String,
    pub discount_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub source: String,
    pub format: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagingConfig {
    pub destination: String,
    pub max_url_length: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn apply_overrides(&mut self, catalog: Option<String>, discount_rate: Option<f64>) {
        if let Some(source) = catalog {
            tracing::info!("Catalog source overridden to: {}", source);
            self.catalog.source = source;
        }
        if let Some(rate) = discount_rate {
            tracing::info!("Discount rate overridden to: {}", rate);
            self.offer.discount_rate = rate;
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("business.name", &self.business.name)?;
        validate_non_empty_string("business.currency_code", &self.business.currency_code)?;
        validate_non_empty_string("offer.name", &self.offer.name)?;
        validate_range("offer.discount_rate", self.offer.discount_rate, 0.0, 1.0)?;

        let source = self.catalog.source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            validate_url("catalog.source", source)?;
        } else {
            validate_path("catalog.source", source)?;
        }
        if let Some(format) = &self.catalog.format {
            CatalogFormat::from_name(format)?;
        }
        if let Some(timeout) = self.catalog.timeout_seconds {
            validate_range("catalog.timeout_seconds", timeout, 1, 300)?;
        }

        validate_digits("messaging.destination", &self.messaging.destination)?;
        if let Some(max) = self.messaging.max_url_length {
            validate_range("messaging.max_url_length", max, 1, MAX_URL_LENGTH)?;
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            if !["compact", "json"].contains(&format) {
                return Err(BookingError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Unsupported format. Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }

    pub fn resolved_catalog_format(&self) -> Result<CatalogFormat> {
        match &self.catalog.format {
            Some(name) => CatalogFormat::from_name(name),
            None => Ok(CatalogFormat::from_location(&self.catalog.source)),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn discount_rate(&self) -> f64 {
        self.offer.discount_rate
    }

    fn catalog_location(&self) -> &str {
        &self.catalog.source
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.catalog.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn business_profile(&self) -> BusinessProfile {
        BusinessProfile {
            business_name: self.business.name.trim().to_string(),
            currency_code: self.business.currency_code.trim().to_string(),
            location_label: self.business.location_label.trim().to_string(),
            hours_label: self.business.hours_label.trim().to_string(),
            destination_identifier: self.messaging.destination.trim().to_string(),
            max_url_length: self
                .messaging
                .max_url_length
                .unwrap_or(MAX_URL_LENGTH)
                .min(MAX_URL_LENGTH),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[business]
name = "Glow Parlor"
currency_code = "SAR"
location_label = "Al Khobar"
hours_label = "12:00 PM – 12:00 AM"

[offer]
name = "Glow Offer"
discount_rate = 0.10

[catalog]
source = "prices.json"

[messaging]
destination = "966500000000"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.business.name, "Glow Parlor");
        assert_eq!(config.discount_rate(), 0.10);
        assert_eq!(config.request_timeout_seconds(), 10);
        assert_eq!(config.resolved_catalog_format().unwrap(), CatalogFormat::Json);
        assert!(!config.json_logging());
        assert!(config.validate().is_ok());

        let profile = config.business_profile();
        assert_eq!(profile.destination_identifier, "966500000000");
        assert_eq!(profile.max_url_length, MAX_URL_LENGTH);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_BOOKING_DESTINATION", "966511111111");

        let content = BASIC.replace("966500000000", "${TEST_BOOKING_DESTINATION}");
        let config = TomlConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.messaging.destination, "966511111111");

        std::env::remove_var("TEST_BOOKING_DESTINATION");
    }

    #[test]
    fn test_rejects_out_of_range_discount() {
        let content = BASIC.replace("discount_rate = 0.10", "discount_rate = 10.0");
        let config = TomlConfig::from_toml_str(&content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(BookingError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_rejects_non_numeric_destination() {
        let content = BASIC.replace("966500000000", "+966 50");
        let config = TomlConfig::from_toml_str(&content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_url_limit_above_transport_cap() {
        let content = format!("{}max_url_length = 5000\n", BASIC);
        let config = TomlConfig::from_toml_str(&content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = TomlConfig::from_toml_str(BASIC).unwrap();
        config.apply_overrides(Some("https://example.com/prices.csv".to_string()), Some(0.2));
        assert_eq!(config.catalog_location(), "https://example.com/prices.csv");
        assert_eq!(config.discount_rate(), 0.2);
        assert_eq!(config.resolved_catalog_format().unwrap(), CatalogFormat::Csv);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_section_is_parse_error() {
        let content = BASIC.replace("[offer]", "[promo]");
        assert!(matches!(
            TomlConfig::from_toml_str(&content),
            Err(BookingError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.offer.name, "Glow Offer");
    }
}
