#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Metasync Core
//!
//! Moves tabular extracts from a reporting source into a target system.
//!
//! ## Overview
//!
//! A sync pass turns a flat, unordered extract into:
//!
//! - contiguous, gap-free calendar periods (weekly or monthly) or fixed-size
//!   index windows, for incremental delivery
//! - entity-keyed collections with deterministic per-day sequence numbers
//!
//! and hands each group of each window to a target, in order.
//!
//! ## Module Organization
//!
//! - [`partition`] - calendar period arithmetic
//! - [`grouping`] - two-phase grouping and stream mappers
//! - [`batching`] - fixed-size index windows
//! - [`orchestration`] - Source/Target seams and the sync orchestrator
//! - [`sources`] - in-memory extract source and session credentials
//! - [`state_machine`] - pass and window lifecycles
//! - [`models`] - schemas, raw rows and typed records
//! - [`config`] - strict layered configuration
//! - [`error`] - structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use metasync::config::ConfigLoader;
//! use metasync::grouping::InteractionMapper;
//! use metasync::models::{Record, TherapistInteraction};
//! use metasync::orchestration::{Ack, SyncOrchestrator, Target};
//! use metasync::sources::{ExtractSource, StaticExtract};
//! use metasync::{GroupKey, InteractionEntry, SyncResult};
//!
//! struct Printer;
//!
//! #[async_trait::async_trait]
//! impl Target<InteractionEntry> for Printer {
//!     async fn upsert(&self, key: &GroupKey, entries: &[InteractionEntry]) -> SyncResult<Ack> {
//!         println!("{key}: {}", serde_json::to_string(entries).unwrap_or_default());
//!         Ok(Ack::accepted())
//!     }
//! }
//!
//! # async fn example(csv: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new().load()?;
//! metasync::logging::init_structured_logging(&config.logging);
//!
//! let source = ExtractSource::new(
//!     &TherapistInteraction::SCHEMA,
//!     StaticExtract::from_csv("therapist_interactions", csv)?,
//! );
//! let mut orchestrator = SyncOrchestrator::new(
//!     source,
//!     Printer,
//!     InteractionMapper,
//!     config.streams.therapist_interactions.windowing.clone(),
//!     config.execution,
//! );
//! let report = orchestrator.run().await?;
//! println!("{} records delivered", report.records_delivered());
//! # Ok(())
//! # }
//! ```

pub mod batching;
pub mod config;
pub mod constants;
pub mod error;
pub mod grouping;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod partition;
pub mod sources;
pub mod state_machine;
pub mod utils;

pub use batching::{chunks, BatchWindow};
pub use config::{ConfigLoader, SyncConfig};
pub use error::{SyncError, SyncResult, ValidationError};
pub use grouping::{CollectionMapper, GroupKey, GroupedCollection};
pub use models::{InteractionEntry, MembershipEntry, OrganizationEntry};
pub use orchestration::{
    Ack, FailureStrategy, Source, SyncOrchestrator, SyncReport, Target, Window, WindowPlan,
};
pub use partition::{partition, Period, PeriodKind};
pub use state_machine::{SyncState, WindowState};
