//! # Structured Logging Module
//!
//! Console logging for sync passes via `tracing-subscriber`.
//!
//! The filter is seeded from [`LoggingConfig::level`] unless `RUST_LOG` is
//! set. Output is either human-readable (ANSI colours only on a TTY) or one
//! JSON object per line.

use chrono::Utc;
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;
use crate::orchestration::Window;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber once; later calls are no-ops.
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = build_filter(&config.level);
        let use_ansi = IsTerminal::is_terminal(&std::io::stdout());

        let console_layer = if config.json {
            fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(use_ansi)
                .with_filter(filter)
                .boxed()
        };

        if tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .is_err()
        {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        } else {
            tracing::info!(
                level = %config.level,
                json = config.json,
                ansi_colors = use_ansi,
                "🔧 STRUCTURED LOGGING: Initialized"
            );
        }
    });
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Log structured data for a window step
pub fn log_window_operation(
    operation: &str,
    stream: &str,
    window_index: usize,
    window: &Window,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        stream = %stream,
        window_index = window_index,
        window = %window,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "🪟 WINDOW_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "❌ ERROR"
    );
}
