//! Small helpers shared across modules.

mod duration;

pub use duration::format_duration;
