//! Collaborator seams of a sync pass.
//!
//! The orchestrator never performs I/O itself: a [`Source`] produces rows and
//! a [`Target`] receives grouped collections.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use super::types::{Ack, Window};
use crate::error::SyncResult;
use crate::grouping::GroupKey;
use crate::models::RawRow;

/// Produces the rows of one stream's extract.
#[async_trait]
pub trait Source: Send + Sync {
    /// Name of the stream this source serves
    fn stream(&self) -> &'static str;

    /// Load and validate the extract. Failures here abort the pass.
    async fn collect(&mut self) -> SyncResult<()>;

    /// Earliest and latest value of a date field, `None` when there are no rows.
    async fn bounds(&self, field: &str) -> SyncResult<Option<(NaiveDate, NaiveDate)>>;

    /// Number of rows in the collected extract.
    async fn size(&self) -> SyncResult<usize>;

    /// Rows that belong to `window`, in extract order.
    async fn slice(&self, window: &Window) -> SyncResult<Vec<RawRow>>;
}

/// Receives grouped collections, one key at a time.
///
/// Implementations must be idempotent: delivering the same key with the same
/// entries twice must not duplicate anything downstream.
#[async_trait]
pub trait Target<E>: Send + Sync
where
    E: Serialize + Send + Sync,
{
    async fn upsert(&self, key: &GroupKey, entries: &[E]) -> SyncResult<Ack>;
}
