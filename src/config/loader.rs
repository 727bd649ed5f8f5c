//! Configuration Loader
//!
//! Builds a [`SyncConfig`] from a TOML source overlaid by prefixed
//! environment variables, then validates it.

use config::{Config, Environment, File, FileFormat};
use std::env;
use std::path::Path;
use tracing::debug;

use super::error::{ConfigResult, ConfigurationError};
use super::SyncConfig;
use crate::constants::env::{CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, CONFIG_PATH};

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Read overrides from `{prefix}__SECTION__FIELD` instead of `METASYNC__...`.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load the file named by `METASYNC_CONFIG_PATH`.
    pub fn load(&self) -> ConfigResult<SyncConfig> {
        let path = env::var(CONFIG_PATH).map_err(|_| ConfigurationError::MissingRequiredField {
            field: CONFIG_PATH.to_string(),
            context: "environment".to_string(),
        })?;
        self.load_file(path)
    }

    pub fn load_file(&self, path: impl AsRef<Path>) -> ConfigResult<SyncConfig> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        if !path.is_file() {
            return Err(ConfigurationError::FileNotFound { path: source_name });
        }

        let file = File::from(path).format(FileFormat::Toml).required(true);
        self.build(&source_name, file)
    }

    pub fn load_str(&self, toml: &str) -> ConfigResult<SyncConfig> {
        self.build("inline TOML", File::from_str(toml, FileFormat::Toml))
    }

    fn build<S>(&self, source_name: &str, source: S) -> ConfigResult<SyncConfig>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: SyncConfig = Config::builder()
            .add_source(source)
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator(CONFIG_ENV_SEPARATOR)
                    .separator(CONFIG_ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| ConfigurationError::from_config_error(source_name, e))?;

        config.validate()?;

        debug!(
            source = source_name,
            level = %config.logging.level,
            failure_strategy = ?config.execution.failure_strategy,
            max_concurrent_windows = config.execution.max_concurrent_windows.get(),
            "Configuration loaded"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::{FailureStrategy, WindowPlan};
    use crate::partition::PeriodKind;

    const COMPLETE: &str = r#"
[logging]
level = "debug"
json = false

[execution]
failure_strategy = "continue_on_failure"
max_concurrent_windows = 2

[streams.therapist_interactions.windowing]
mode = "period"
field = "interaction_date"
kind = "monthly"

[streams.therapist_organizations.windowing]
mode = "batch"
batch_size = 1000
"#;

    fn loader() -> ConfigLoader {
        ConfigLoader::new().with_env_prefix("METASYNC_LOADER_UNIT")
    }

    #[test]
    fn test_complete_config_loads() {
        let config = loader().load_str(COMPLETE).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.execution.failure_strategy,
            FailureStrategy::ContinueOnFailure
        );
        assert_eq!(
            config.streams.therapist_interactions.windowing,
            WindowPlan::ByPeriod {
                field: "interaction_date".to_string(),
                kind: PeriodKind::Monthly,
            }
        );
    }

    #[test]
    fn test_missing_section_is_an_error_not_a_default() {
        let without_execution = COMPLETE.replace(
            "[execution]\nfailure_strategy = \"continue_on_failure\"\nmax_concurrent_windows = 2\n",
            "",
        );
        let err = loader().load_str(&without_execution).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingRequiredField { ref field, .. } if field == "execution"
        ));
    }

    #[test]
    fn test_unknown_period_kind_is_a_parse_error() {
        let quarterly = COMPLETE.replace("kind = \"monthly\"", "kind = \"quarterly\"");
        assert!(matches!(
            loader().load_str(&quarterly),
            Err(ConfigurationError::ParseError { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = loader().load_file("/nonexistent/metasync.toml").unwrap_err();
        assert!(matches!(err, ConfigurationError::FileNotFound { .. }));
    }
}
