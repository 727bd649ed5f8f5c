use serde::{Deserialize, Serialize};

/// Events that drive a sync pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SyncEvent {
    /// Ask the source to load and validate the extract
    Collect,
    /// Plan calendar windows
    Partition,
    /// Plan index windows
    Chunk,
    /// Start working through the planned windows
    Process,
    /// All windows attempted
    Complete,
    /// Abort the pass with a reason
    Fail(String),
}

impl SyncEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Collect => "collect",
            Self::Partition => "partition",
            Self::Chunk => "chunk",
            Self::Process => "process",
            Self::Complete => "complete",
            Self::Fail(_) => "fail",
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Fail(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn fail_with_error(error: impl ToString) -> Self {
        Self::Fail(error.to_string())
    }
}

/// Events that drive a single delivery window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WindowEvent {
    Slice,
    Group,
    Deliver,
    Complete,
    Fail(String),
    Skip,
}

impl WindowEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Slice => "slice",
            Self::Group => "group",
            Self::Deliver => "deliver",
            Self::Complete => "complete",
            Self::Fail(_) => "fail",
            Self::Skip => "skip",
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Fail(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn fail_with_error(error: impl ToString) -> Self {
        Self::Fail(error.to_string())
    }
}
