//! # Orchestration
//!
//! Composes partitioning, chunking and grouping with an external
//! [`Source`] and [`Target`] to drive one synchronization pass.
//!
//! ## Core Components
//!
//! - **SyncOrchestrator**: runs collect, plan and per-window delivery
//! - **Source / Target**: the only seams where I/O happens
//! - **WindowPlan**: calendar periods or fixed-size batches
//! - **SyncReport**: per-window outcomes, in window order

pub mod sync_orchestrator;
pub mod traits;
pub mod types;

pub use sync_orchestrator::SyncOrchestrator;
pub use traits::{Source, Target};
pub use types::{Ack, FailureStrategy, SyncReport, Window, WindowOutcome, WindowPlan};
