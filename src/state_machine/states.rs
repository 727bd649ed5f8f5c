use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of one sync pass over a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Pass created, nothing loaded yet
    #[default]
    Init,
    /// Source is loading and validating the extract
    Collecting,
    /// Computing calendar windows from the date bounds
    Partitioning,
    /// Computing index windows from the dataset size
    Chunking,
    /// Slicing, grouping and delivering windows
    Processing,
    /// Every window was attempted
    Done,
    /// Pass aborted
    Failed,
}

impl SyncState {
    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Check if windows have been planned
    pub fn has_windows(&self) -> bool {
        matches!(self, Self::Processing | Self::Done)
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::Collecting => write!(f, "collecting"),
            Self::Partitioning => write!(f, "partitioning"),
            Self::Chunking => write!(f, "chunking"),
            Self::Processing => write!(f, "processing"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for SyncState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "init" => Ok(Self::Init),
            "collecting" => Ok(Self::Collecting),
            "partitioning" => Ok(Self::Partitioning),
            "chunking" => Ok(Self::Chunking),
            "processing" => Ok(Self::Processing),
            "done" => Ok(Self::Done),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid sync state: {s}")),
        }
    }
}

/// Lifecycle of one delivery window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WindowState {
    /// Planned, not started
    #[default]
    Pending,
    /// Source is producing the window's rows
    Slicing,
    /// Rows are being coerced and grouped
    Grouping,
    /// Groups are being handed to the target
    Delivering,
    /// Every group was acknowledged
    Delivered,
    /// Slicing, grouping or a delivery failed
    Failed,
    /// Never attempted because the pass aborted
    Skipped,
}

impl WindowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Failed | Self::Skipped)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Slicing | Self::Grouping | Self::Delivering)
    }
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Slicing => write!(f, "slicing"),
            Self::Grouping => write!(f, "grouping"),
            Self::Delivering => write!(f, "delivering"),
            Self::Delivered => write!(f, "delivered"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

impl std::str::FromStr for WindowState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "slicing" => Ok(Self::Slicing),
            "grouping" => Ok(Self::Grouping),
            "delivering" => Ok(Self::Delivering),
            "delivered" => Ok(Self::Delivered),
            "failed" => Ok(Self::Failed),
            "skipped" => Ok(Self::Skipped),
            _ => Err(format!("Invalid window state: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_state_terminal_check() {
        assert!(SyncState::Done.is_terminal());
        assert!(SyncState::Failed.is_terminal());
        assert!(!SyncState::Init.is_terminal());
        assert!(!SyncState::Collecting.is_terminal());
        assert!(!SyncState::Processing.is_terminal());
    }

    #[test]
    fn test_window_state_classification() {
        assert!(WindowState::Delivered.is_terminal());
        assert!(WindowState::Skipped.is_terminal());
        assert!(WindowState::Grouping.is_active());
        assert!(!WindowState::Pending.is_active());
    }

    #[test]
    fn test_state_string_conversion() {
        assert_eq!(SyncState::Partitioning.to_string(), "partitioning");
        assert_eq!("chunking".parse::<SyncState>().unwrap(), SyncState::Chunking);
        assert_eq!(WindowState::Delivering.to_string(), "delivering");
        assert_eq!(
            "skipped".parse::<WindowState>().unwrap(),
            WindowState::Skipped
        );
        assert!("paused".parse::<SyncState>().is_err());
    }

    #[test]
    fn test_state_serde() {
        let json = serde_json::to_string(&WindowState::Delivered).unwrap();
        assert_eq!(json, "\"delivered\"");

        let parsed: SyncState = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(parsed, SyncState::Processing);
    }
}
