//! # Batch Chunking
//!
//! Index-window delivery for streams synced by record count rather than by
//! date. Windows are independent, so callers may process them concurrently.

mod chunker;

pub use chunker::{chunks, BatchWindow};
