//! # Orchestration Types
//!
//! Window plans, delivery acknowledgements and the per-pass report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use uuid::Uuid;

use crate::batching::BatchWindow;
use crate::grouping::GroupKey;
use crate::partition::{Period, PeriodKind};
use crate::state_machine::{SyncState, WindowState};

/// How a stream's extract is cut into delivery windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WindowPlan {
    /// Calendar periods spanning the min/max of a date field
    #[serde(rename = "period")]
    ByPeriod { field: String, kind: PeriodKind },
    /// Fixed-size index windows over the extract
    #[serde(rename = "batch")]
    ByBatch { batch_size: NonZeroUsize },
}

/// What happens to the rest of a pass once a window fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStrategy {
    /// Record the failure and keep delivering the remaining windows
    ContinueOnFailure,
    /// Stop starting new windows after the first failure
    FailFast,
}

/// A single unit of slicing and delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Window {
    /// Rows whose `field` falls inside `period`
    Period { field: String, period: Period },
    /// Rows at the window's positions in the extract
    Batch(BatchWindow),
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Period { field, period } => write!(f, "{field} in {period}"),
            Self::Batch(batch) => write!(f, "rows {batch}"),
        }
    }
}

/// Target's acknowledgement of one upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub accepted: bool,
    pub response: Option<serde_json::Value>,
}

impl Ack {
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            response: None,
        }
    }

    pub fn with_response(response: serde_json::Value) -> Self {
        Self {
            accepted: true,
            response: Some(response),
        }
    }

    pub fn rejected(response: Option<serde_json::Value>) -> Self {
        Self {
            accepted: false,
            response,
        }
    }
}

/// Result of one window, with enough context to re-run just that window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowOutcome {
    pub index: usize,
    pub window: Window,
    pub state: WindowState,
    /// Rows the source produced for the window
    pub rows: usize,
    pub groups_delivered: usize,
    pub records_delivered: usize,
    /// First key the target failed on, if delivery got that far
    pub failed_key: Option<GroupKey>,
    pub error: Option<String>,
}

impl WindowOutcome {
    pub fn new(index: usize, window: Window) -> Self {
        Self {
            index,
            window,
            state: WindowState::Pending,
            rows: 0,
            groups_delivered: 0,
            records_delivered: 0,
            failed_key: None,
            error: None,
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.state == WindowState::Delivered
    }
}

/// Summary of one sync pass over a stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    pub run_id: Uuid,
    pub stream: String,
    pub state: SyncState,
    /// Outcomes in ascending window order
    pub windows: Vec<WindowOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SyncReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &WindowOutcome> {
        self.windows.iter().filter(|w| w.state == WindowState::Delivered)
    }

    pub fn failed(&self) -> impl Iterator<Item = &WindowOutcome> {
        self.windows.iter().filter(|w| w.state == WindowState::Failed)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &WindowOutcome> {
        self.windows.iter().filter(|w| w.state == WindowState::Skipped)
    }

    pub fn is_success(&self) -> bool {
        self.state == SyncState::Done && self.failed().next().is_none()
    }

    pub fn records_delivered(&self) -> usize {
        self.windows.iter().map(|w| w.records_delivered).sum()
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
