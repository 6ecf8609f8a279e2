use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Could not load catalog from {source_name}: {message}")]
    CatalogLoadError {
        source_name: String,
        message: String,
    },

    #[error("No services selected")]
    EmptySelectionError,

    #[error("Message URL is {length} characters, limit is {limit}")]
    PayloadTooLargeError { length: usize, limit: usize },

    #[error("Unknown service: {name}")]
    UnknownServiceError { name: String },

    #[error("Invalid appointment time '{value}': {reason}")]
    InvalidAppointmentTimeError { value: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Catalog,
    Selection,
    Transport,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn catalog_load(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::CatalogLoadError {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CatalogLoadError { .. } => ErrorCategory::Catalog,
            Self::EmptySelectionError
            | Self::UnknownServiceError { .. }
            | Self::InvalidAppointmentTimeError { .. } => ErrorCategory::Selection,
            Self::PayloadTooLargeError { .. } => ErrorCategory::Transport,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Selection | ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Catalog | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// User errors that leave the session intact; the caller re-prompts.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EmptySelectionError
                | Self::PayloadTooLargeError { .. }
                | Self::UnknownServiceError { .. }
                | Self::InvalidAppointmentTimeError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::CatalogLoadError { source_name, .. } => {
                format!("Could not load services from {}.", source_name)
            }
            Self::EmptySelectionError => "Please select at least one service.".to_string(),
            Self::PayloadTooLargeError { .. } => {
                "Message is too long for the messaging app. Please select fewer services."
                    .to_string()
            }
            Self::UnknownServiceError { name } => {
                format!("'{}' is not on the price list.", name)
            }
            Self::InvalidAppointmentTimeError { value, .. } => {
                format!("'{}' is not a valid appointment time.", value)
            }
            Self::MissingConfigError { field } => {
                format!("Configuration is missing '{}'.", field)
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => format!("Configuration problem: {}", self),
            Self::IoError(e) => format!("File system error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::CatalogLoadError { .. } => {
                "Check that the price list exists and is valid, then start a new session"
            }
            Self::EmptySelectionError => "Select one or more services and try again",
            Self::PayloadTooLargeError { .. } => "Deselect some services and try again",
            Self::UnknownServiceError { .. } => "Run the catalog command to list service names",
            Self::InvalidAppointmentTimeError { .. } => {
                "Use the format YYYY-MM-DDTHH:MM, for example 2026-10-17T15:30"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix the configuration file and rerun",
            Self::IoError(_) => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors_are_recoverable() {
        assert!(BookingError::EmptySelectionError.is_recoverable());
        assert!(BookingError::PayloadTooLargeError {
            length: 2050,
            limit: 2000
        }
        .is_recoverable());
        assert!(!BookingError::catalog_load("prices.json", "missing").is_recoverable());
    }

    #[test]
    fn test_severity_by_category() {
        assert_eq!(
            BookingError::EmptySelectionError.severity(),
            ErrorSeverity::Medium
        );
        assert_eq!(
            BookingError::catalog_load("prices.json", "bad json").severity(),
            ErrorSeverity::High
        );
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(BookingError::from(io_err).severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_error_display() {
        let err = BookingError::PayloadTooLargeError {
            length: 2050,
            limit: 2000,
        };
        assert_eq!(
            err.to_string(),
            "Message URL is 2050 characters, limit is 2000"
        );
        assert_eq!(
            BookingError::EmptySelectionError.user_friendly_message(),
            "Please select at least one service."
        );
    }
}
