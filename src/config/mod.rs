//! # Sync Configuration
//!
//! Explicit, validated configuration for sync passes.
//!
//! ## Architecture
//!
//! - **Layered sources**: a TOML file (or string) overlaid by `METASYNC__*`
//!   environment variables, merged with the `config` crate
//! - **No silent defaults**: every field is required; an absent field is a
//!   load error rather than a fallback value
//! - **Explicit validation**: values serde cannot reject on its own are
//!   checked by [`SyncConfig::validate`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use metasync::config::ConfigLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new().load_file("config/metasync.toml")?;
//! let interactions = &config.streams.therapist_interactions;
//! println!("{:?}", interactions.windowing);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::constants::streams;
use crate::orchestration::{FailureStrategy, WindowPlan};

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigLoader;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    pub logging: LoggingConfig,
    pub execution: ExecutionConfig,
    pub streams: StreamsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set
    pub level: String,
    /// Emit JSON records instead of human-readable lines
    pub json: bool,
}

/// How windows of a pass are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionConfig {
    pub failure_strategy: FailureStrategy,
    pub max_concurrent_windows: NonZeroUsize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamsConfig {
    pub therapist_interactions: StreamConfig,
    pub therapist_organizations: StreamConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamConfig {
    pub windowing: WindowPlan,
}

impl SyncConfig {
    /// Check the values serde accepts but a pass cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        let level = self.logging.level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigurationError::invalid_value(
                "logging.level",
                self.logging.level.clone(),
                format!("expected one of {LOG_LEVELS:?}"),
            ));
        }

        for (name, stream) in self.streams.iter() {
            if let WindowPlan::ByPeriod { field, .. } = &stream.windowing {
                if field.trim().is_empty() {
                    return Err(ConfigurationError::invalid_value(
                        format!("streams.{name}.windowing.field"),
                        field.clone(),
                        "period windowing needs a date field",
                    ));
                }
            }
        }

        Ok(())
    }

    /// Configuration of the named stream.
    pub fn stream(&self, name: &str) -> ConfigResult<&StreamConfig> {
        self.streams
            .iter()
            .find(|(stream, _)| *stream == name)
            .map(|(_, config)| config)
            .ok_or_else(|| ConfigurationError::MissingRequiredField {
                field: format!("streams.{name}"),
                context: "sync configuration".to_string(),
            })
    }
}

impl StreamsConfig {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StreamConfig)> {
        [
            (streams::THERAPIST_INTERACTIONS, &self.therapist_interactions),
            (streams::THERAPIST_ORGANIZATIONS, &self.therapist_organizations),
        ]
        .into_iter()
    }
}
