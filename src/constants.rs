//! Shared constants for stream names, column names and formats.

/// Separator between entity id and date in a composite grouping key.
pub const COMPOSITE_KEY_SEPARATOR: char = '#';

/// Years an extract date cell may carry; anything else is a coercion error.
pub const ACCEPTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Date formats accepted when reading extract cells, tried in order.
pub const ACCEPTED_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

pub mod streams {
    pub const THERAPIST_INTERACTIONS: &str = "therapist_interactions";
    pub const THERAPIST_ORGANIZATIONS: &str = "therapist_organizations";
}

pub mod columns {
    pub const THERAPIST_ID: &str = "therapist_id";
    pub const ORGANIZATION_ID: &str = "organization_id";
    pub const DATE_JOINED: &str = "date_joined";
    pub const INTERACTION_DATE: &str = "interaction_date";
    pub const THERAPIST_CHAT_COUNT: &str = "therapist_chat_count";
    pub const CALL_COUNT: &str = "call_count";
}

pub mod env {
    /// Prefix for environment overrides of [`crate::config::SyncConfig`].
    pub const CONFIG_ENV_PREFIX: &str = "METASYNC";
    /// Nesting separator for environment overrides, e.g. `METASYNC__LOGGING__LEVEL`.
    pub const CONFIG_ENV_SEPARATOR: &str = "__";
    /// Path of the TOML configuration file when none is given explicitly.
    pub const CONFIG_PATH: &str = "METASYNC_CONFIG_PATH";
}
