//! Raw extract rows as delivered by a reporting source.
//!
//! An extract is a header row plus string cells. Cells are looked up by
//! column name and coerced to their declared type only when a mapper asks
//! for them, so a malformed cell fails the window that reads it rather than
//! the whole extract.

use chrono::NaiveDate;
use indexmap::IndexMap;
use std::io::Read;
use std::sync::Arc;

use super::schema::{ColumnType, Schema};
use crate::error::{SyncError, SyncResult, ValidationError};
use crate::partition::parse_date_str;

/// Column name to cell position, in header order.
pub type HeaderIndex = IndexMap<String, usize>;

/// A header row and its data rows, before any schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExtract {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawExtract {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Parse CSV text whose first record is the header row.
    pub fn from_csv_reader<R: Read>(stream: &str, reader: R) -> Result<Self, ValidationError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = reader.records();
        let headers = match records.next() {
            Some(record) => record
                .map_err(|e| malformed(stream, e))?
                .iter()
                .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
                .collect(),
            None => Vec::new(),
        };

        let rows = records
            .map(|record| {
                record
                    .map(|r| r.iter().map(str::to_string).collect())
                    .map_err(|e| malformed(stream, e))
            })
            .collect::<Result<Vec<Vec<String>>, _>>()?;

        Ok(Self { headers, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Validate against `schema` and index every row by column name.
    ///
    /// Fails on an empty extract, a header set that differs from the schema,
    /// or a row whose width differs from the header row.
    pub fn into_rows(self, schema: &Schema) -> Result<Vec<RawRow>, ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyExtract {
                stream: schema.stream.to_string(),
            });
        }
        schema.validate_headers(&self.headers)?;

        let index: Arc<HeaderIndex> = Arc::new(
            self.headers
                .iter()
                .enumerate()
                .map(|(position, name)| (name.clone(), position))
                .collect(),
        );
        let width = self.headers.len();

        self.rows
            .into_iter()
            .enumerate()
            .map(|(offset, values)| {
                let line = offset + 1;
                if values.len() != width {
                    return Err(ValidationError::RaggedRow {
                        stream: schema.stream.to_string(),
                        line,
                        expected: width,
                        found: values.len(),
                    });
                }
                Ok(RawRow {
                    stream: schema.stream,
                    line,
                    index: Arc::clone(&index),
                    values,
                })
            })
            .collect()
    }
}

fn malformed(stream: &str, error: csv::Error) -> ValidationError {
    ValidationError::Malformed {
        stream: stream.to_string(),
        reason: error.to_string(),
    }
}

/// One data row of a validated extract.
///
/// `line` is the 1-based data row number (the header row is not counted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    stream: &'static str,
    line: usize,
    index: Arc<HeaderIndex>,
    values: Vec<String>,
}

impl RawRow {
    pub fn stream(&self) -> &'static str {
        self.stream
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.index
            .get(field)
            .and_then(|&position| self.values.get(position))
            .map(String::as_str)
    }

    pub fn text(&self, field: &str) -> SyncResult<String> {
        let value = self.cell(field, ColumnType::Text)?.trim();
        if value.is_empty() {
            return Err(self.coercion_error(field, value, ColumnType::Text));
        }
        Ok(value.to_string())
    }

    pub fn integer(&self, field: &str) -> SyncResult<i64> {
        let value = self.cell(field, ColumnType::Integer)?.trim();
        value
            .parse::<i64>()
            .map_err(|_| self.coercion_error(field, value, ColumnType::Integer))
    }

    pub fn date(&self, field: &str) -> SyncResult<NaiveDate> {
        let value = self.cell(field, ColumnType::Date)?;
        parse_date_str(value).ok_or_else(|| self.coercion_error(field, value, ColumnType::Date))
    }

    fn cell(&self, field: &str, expected: ColumnType) -> SyncResult<&str> {
        self.get(field)
            .ok_or_else(|| self.coercion_error(field, "<missing>", expected))
    }

    fn coercion_error(&self, field: &str, value: &str, expected: ColumnType) -> SyncError {
        SyncError::TypeCoercion {
            stream: self.stream.to_string(),
            field: field.to_string(),
            value: value.to_string(),
            expected,
            line: self.line,
        }
    }
}
