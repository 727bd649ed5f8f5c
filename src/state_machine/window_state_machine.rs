use chrono::Utc;

use super::{events::WindowEvent, states::WindowState, sync_state_machine::Transition};
use crate::error::{SyncError, SyncResult};

/// State machine for a single delivery window
#[derive(Debug, Clone, Default)]
pub struct WindowStateMachine {
    index: usize,
    current: WindowState,
    history: Vec<Transition<WindowState>>,
}

impl WindowStateMachine {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    pub fn current_state(&self) -> WindowState {
        self.current
    }

    pub fn history(&self) -> &[Transition<WindowState>] {
        &self.history
    }

    pub fn transition(&mut self, event: WindowEvent) -> SyncResult<WindowState> {
        let from = self.current;
        let to = Self::determine_target_state(from, &event)?;

        tracing::trace!(
            window = self.index,
            from = %from,
            to = %to,
            event = event.event_type(),
            "Window transition"
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

    fn determine_target_state(
        current: WindowState,
        event: &WindowEvent,
    ) -> SyncResult<WindowState> {
        let target = match (current, event) {
            (WindowState::Pending, WindowEvent::Slice) => WindowState::Slicing,
            (WindowState::Slicing, WindowEvent::Group) => WindowState::Grouping,
            (WindowState::Grouping, WindowEvent::Deliver) => WindowState::Delivering,
            (WindowState::Delivering, WindowEvent::Complete) => WindowState::Delivered,

            (from, WindowEvent::Fail(_)) if from.is_active() => WindowState::Failed,
            (WindowState::Pending, WindowEvent::Skip) => WindowState::Skipped,

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
