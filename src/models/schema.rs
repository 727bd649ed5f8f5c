//! Schema descriptors for extract streams.
//!
//! Each stream declares its columns statically. The header row found in a
//! raw extract must equal the declared column names as a set; order is free.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::ValidationError;

/// Declared type of an extract column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Integer,
    Date,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Integer => write!(f, "integer"),
            Self::Date => write!(f, "date"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub column_type: ColumnType,
}

impl Column {
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self { name, column_type }
    }
}

/// Static description of one extract stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub stream: &'static str,
    pub columns: &'static [Column],
}

impl Schema {
    pub const fn new(stream: &'static str, columns: &'static [Column]) -> Self {
        Self { stream, columns }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|column| column.name)
    }

    /// Compare a header row against the declared columns as sets.
    pub fn validate_headers<S: AsRef<str>>(&self, headers: &[S]) -> Result<(), ValidationError> {
        let expected: BTreeSet<&str> = self.column_names().collect();
        let found: BTreeSet<&str> = headers.iter().map(|h| h.as_ref()).collect();

        if expected == found {
            return Ok(());
        }

        Err(ValidationError::SchemaMismatch {
            stream: self.stream.to_string(),
            missing: expected.difference(&found).map(|s| s.to_string()).collect(),
            unexpected: found.difference(&expected).map(|s| s.to_string()).collect(),
        })
    }

    /// Ensure `field` exists and holds dates.
    pub fn require_date_column(&self, field: &str) -> Result<(), ValidationError> {
        match self.column(field) {
            Some(column) if column.column_type == ColumnType::Date => Ok(()),
            Some(_) => Err(ValidationError::NotADateField {
                stream: self.stream.to_string(),
                field: field.to_string(),
            }),
            None => Err(ValidationError::UnknownField {
                stream: self.stream.to_string(),
                field: field.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[Column] = &[
        Column::new("therapist_id", ColumnType::Text),
        Column::new("organization_id", ColumnType::Integer),
        Column::new("date_joined", ColumnType::Date),
    ];
    const SCHEMA: Schema = Schema::new("memberships", COLUMNS);

    #[test]
    fn test_headers_match_in_any_order() {
        assert!(SCHEMA
            .validate_headers(&["date_joined", "therapist_id", "organization_id"])
            .is_ok());
    }

    #[test]
    fn test_header_mismatch_lists_differences() {
        let err = SCHEMA.validate_headers(&["a", "b"]).unwrap_err();
        match err {
            ValidationError::SchemaMismatch {
                missing,
                unexpected,
                ..
            } => {
                assert_eq!(missing, vec!["date_joined", "organization_id", "therapist_id"]);
                assert_eq!(unexpected, vec!["a", "b"]);
            }
            other => panic!("Expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_require_date_column() {
        assert!(SCHEMA.require_date_column("date_joined").is_ok());
        assert!(matches!(
            SCHEMA.require_date_column("therapist_id"),
            Err(ValidationError::NotADateField { .. })
        ));
        assert!(matches!(
            SCHEMA.require_date_column("missing"),
            Err(ValidationError::UnknownField { .. })
        ));
    }
}
