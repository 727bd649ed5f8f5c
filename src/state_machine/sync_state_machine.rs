use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{events::SyncEvent, states::SyncState};
use crate::error::{SyncError, SyncResult};

/// One applied state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition<S> {
    pub from: S,
    pub to: S,
    pub event: String,
    pub at: DateTime<Utc>,
}

/// State machine for one sync pass
#[derive(Debug, Clone, Default)]
pub struct SyncStateMachine {
    current: SyncState,
    history: Vec<Transition<SyncState>>,
}

impl SyncStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_state(&self) -> SyncState {
        self.current
    }

    pub fn history(&self) -> &[Transition<SyncState>] {
        &self.history
    }

    /// Attempt to transition the pass state
    pub fn transition(&mut self, event: SyncEvent) -> SyncResult<SyncState> {
        let from = self.current;
        let to = Self::determine_target_state(from, &event)?;

        tracing::debug!(
            from = %from,
            to = %to,
            event = event.event_type(),
            error = event.error_message(),
            "Sync pass transition"
        );

        self.history.push(Transition {
            from,
            to,
            event: event.event_type().to_string(),
            at: Utc::now(),
        });
        self.current = to;
        Ok(to)
    }

    /// Determine the target state based on current state and event
    fn determine_target_state(current: SyncState, event: &SyncEvent) -> SyncResult<SyncState> {
        let target = match (current, event) {
            (SyncState::Init, SyncEvent::Collect) => SyncState::Collecting,

            (SyncState::Collecting, SyncEvent::Partition) => SyncState::Partitioning,
            (SyncState::Collecting, SyncEvent::Chunk) => SyncState::Chunking,

            (SyncState::Partitioning | SyncState::Chunking, SyncEvent::Process) => {
                SyncState::Processing
            }

            (SyncState::Processing, SyncEvent::Complete) => SyncState::Done,

            (from, SyncEvent::Fail(_)) if !from.is_terminal() => SyncState::Failed,

            (from, _) => {
                return Err(SyncError::StateTransition {
                    from: from.to_string(),
                    event: event.event_type().to_string(),
                })
            }
        };

        Ok(target)
    }
}
