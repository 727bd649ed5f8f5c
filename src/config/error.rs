//! Configuration Error Types
//!
//! Loading never falls back to a default: every failure names the file,
//! field or value that needs fixing.

use thiserror::Error;

use crate::error::SyncError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No configuration file at the given path
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Source could not be parsed or did not match the expected shape
    #[error("Parse error in {source_name}: {reason}")]
    ParseError { source_name: String, reason: String },

    /// Missing required configuration field
    #[error("Missing required configuration field '{field}' in {context}")]
    MissingRequiredField { field: String, context: String },

    /// Invalid configuration value
    #[error("Invalid value '{value}' for field '{field}': {context}")]
    InvalidValue {
        field: String,
        value: String,
        context: String,
    },
}

impl ConfigurationError {
    pub fn parse_error(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::ParseError {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            context: context.into(),
        }
    }

    /// Classify an error from the layered `config` builder.
    pub(crate) fn from_config_error(source_name: &str, error: config::ConfigError) -> Self {
        match error {
            config::ConfigError::NotFound(field) => Self::MissingRequiredField {
                field,
                context: source_name.to_string(),
            },
            other => {
                let reason = other.to_string();
                match missing_field_name(&reason) {
                    Some(field) => Self::MissingRequiredField {
                        field,
                        context: source_name.to_string(),
                    },
                    None => Self::parse_error(source_name, reason),
                }
            }
        }
    }
}

/// serde reports absent fields as "missing field `name`".
fn missing_field_name(reason: &str) -> Option<String> {
    let rest = reason.split("missing field `").nth(1)?;
    let name = rest.split('`').next()?;
    (!name.is_empty()).then(|| name.to_string())
}

impl From<ConfigurationError> for SyncError {
    fn from(error: ConfigurationError) -> Self {
        SyncError::Configuration(error.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigurationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_extracted_from_serde_message() {
        assert_eq!(
            missing_field_name("missing field `failure_strategy`"),
            Some("failure_strategy".to_string())
        );
        assert_eq!(missing_field_name("invalid type: string"), None);
    }

    #[test]
    fn test_converts_into_sync_error() {
        let err: SyncError = ConfigurationError::invalid_value("logging.level", "loud", "unknown level").into();
        assert!(matches!(err, SyncError::Configuration(ref msg) if msg.contains("loud")));
        assert!(err.is_fatal());
    }
}
