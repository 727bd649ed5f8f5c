// State machines for sync passes and their delivery windows.
//
// Transitions are resolved from an explicit (state, event) table; anything
// not listed is rejected with a StateTransition error.

pub mod events;
pub mod states;
pub mod sync_state_machine;
pub mod window_state_machine;

pub use events::{SyncEvent, WindowEvent};
pub use states::{SyncState, WindowState};
pub use sync_state_machine::{SyncStateMachine, Transition};
pub use window_state_machine::WindowStateMachine;
