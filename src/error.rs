//! Error types for the sync core.
//!

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::schema::ColumnType;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Range error: start date {start} is after end date {end}")]
    Range { start: NaiveDate, end: NaiveDate },
    #[error("Date {date} has no complete calendar period")]
    OutOfCalendar { date: NaiveDate },
    #[error("Unsupported period kind '{0}', expected 'weekly' or 'monthly'")]
    UnsupportedKind(String),
    #[error(
        "Type coercion error in stream {stream} at line {line}: field '{field}' value '{value}' is not a valid {expected}"
    )]
    TypeCoercion {
        stream: String,
        field: String,
        value: String,
        expected: ColumnType,
        line: usize,
    },
    #[error("Delivery error for key {key}: {reason}")]
    Delivery { key: String, reason: String },
    #[error("Source error for stream {stream}: {reason}")]
    Source { stream: String, reason: String },
    #[error("Credential error: {0}")]
    Credential(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("State transition error: cannot apply '{event}' from state '{from}'")]
    StateTransition { from: String, event: String },
}

impl SyncError {
    pub fn delivery(key: impl ToString, reason: impl ToString) -> Self {
        Self::Delivery {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn source(stream: impl Into<String>, reason: impl ToString) -> Self {
        Self::Source {
            stream: stream.into(),
            reason: reason.to_string(),
        }
    }

    /// Errors raised while loading the extract abort the whole pass.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Range { .. }
                | Self::OutOfCalendar { .. }
                | Self::UnsupportedKind(_)
                | Self::Configuration(_)
                | Self::Credential(_)
                | Self::Source { .. }
        )
    }
}

/// Extract-level validation failures, raised at collection time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("extract for stream {stream} is empty or has no header row")]
    EmptyExtract { stream: String },
    #[error(
        "header set of stream {stream} has changed: missing {missing:?}, unexpected {unexpected:?}"
    )]
    SchemaMismatch {
        stream: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
    #[error("row at line {line} of stream {stream} has {found} fields, expected {expected}")]
    RaggedRow {
        stream: String,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("stream {stream} has no field named '{field}'")]
    UnknownField { stream: String, field: String },
    #[error("field '{field}' of stream {stream} is not a date column")]
    NotADateField { stream: String, field: String },
    #[error("extract for stream {stream} could not be parsed: {reason}")]
    Malformed { stream: String, reason: String },
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;
