//! In-memory [`Source`] over an extract produced by a fetcher.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{SyncError, SyncResult};
use crate::models::{RawExtract, RawRow, Schema};
use crate::orchestration::{Source, Window};

/// Produces the raw extract for a stream, e.g. by downloading a saved question.
#[async_trait]
pub trait ExtractFetcher: Send + Sync {
    async fn fetch(&self, stream: &'static str) -> SyncResult<RawExtract>;
}

/// Fetcher over an extract that is already in memory.
#[derive(Debug, Clone)]
pub struct StaticExtract {
    extract: RawExtract,
}

impl StaticExtract {
    pub fn new(extract: RawExtract) -> Self {
        Self { extract }
    }

    /// Parse CSV bytes whose first record is the header row.
    pub fn from_csv(stream: &str, bytes: &[u8]) -> SyncResult<Self> {
        Ok(Self::new(RawExtract::from_csv_reader(stream, bytes)?))
    }
}

#[async_trait]
impl ExtractFetcher for StaticExtract {
    async fn fetch(&self, _stream: &'static str) -> SyncResult<RawExtract> {
        Ok(self.extract.clone())
    }
}

/// Source that validates a fetched extract once and serves slices from memory.
#[derive(Debug)]
pub struct ExtractSource<F> {
    schema: &'static Schema,
    fetcher: F,
    rows: Option<Vec<RawRow>>,
}

impl<F: ExtractFetcher> ExtractSource<F> {
    pub fn new(schema: &'static Schema, fetcher: F) -> Self {
        Self {
            schema,
            fetcher,
            rows: None,
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn is_collected(&self) -> bool {
        self.rows.is_some()
    }

    /// Validated rows; only available after `collect`.
    pub fn rows(&self) -> SyncResult<&[RawRow]> {
        self.rows.as_deref().ok_or_else(|| {
            SyncError::InvalidState(format!(
                "extract for stream {} has not been collected",
                self.schema.stream
            ))
        })
    }
}

#[async_trait]
impl<F: ExtractFetcher> Source for ExtractSource<F> {
    fn stream(&self) -> &'static str {
        self.schema.stream
    }

    async fn collect(&mut self) -> SyncResult<()> {
        let extract = self.fetcher.fetch(self.schema.stream).await?;
        let rows = extract.into_rows(self.schema)?;

        info!(
            stream = self.schema.stream,
            rows = rows.len(),
            "📥 Collected extract"
        );
        self.rows = Some(rows);
        Ok(())
    }

    async fn bounds(&self, field: &str) -> SyncResult<Option<(NaiveDate, NaiveDate)>> {
        self.schema.require_date_column(field)?;

        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for row in self.rows()? {
            let date = row.date(field)?;
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(date), max.max(date)),
                None => (date, date),
            });
        }

        debug!(stream = self.schema.stream, field = field, bounds = ?bounds, "Computed date bounds");
        Ok(bounds)
    }

    async fn size(&self) -> SyncResult<usize> {
        Ok(self.rows()?.len())
    }

    async fn slice(&self, window: &Window) -> SyncResult<Vec<RawRow>> {
        let rows = self.rows()?;

        match window {
            Window::Period { field, period } => {
                self.schema.require_date_column(field)?;
                let mut selected = Vec::new();
                for row in rows {
                    if period.contains(row.date(field)?) {
                        selected.push(row.clone());
                    }
                }
                Ok(selected)
            }
            Window::Batch(batch) => rows
                .get(batch.range())
                .map(<[RawRow]>::to_vec)
                .ok_or_else(|| {
                    SyncError::InvalidState(format!(
                        "window {batch} is outside the {} collected rows of stream {}",
                        rows.len(),
                        self.schema.stream
                    ))
                }),
        }
    }
}
