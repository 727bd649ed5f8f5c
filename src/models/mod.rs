//! # Data Models
//!
//! - [`schema`] - per-stream column declarations and header validation
//! - [`extract`] - raw extracts and name-indexed rows with typed cell access
//! - [`records`] - typed stream records and the entries delivered to targets

pub mod extract;
pub mod records;
pub mod schema;

pub use extract::{HeaderIndex, RawExtract, RawRow};
pub use records::{
    InteractionEntry, MembershipEntry, OrganizationEntry, Record, TherapistInteraction,
    TherapistMembership,
};
pub use schema::{Column, ColumnType, Schema};
