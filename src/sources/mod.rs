//! # Sources
//!
//! Ready-made [`Source`](crate::orchestration::Source) collaborators and the
//! credential lifecycle shared by sources and targets.

mod credentials;
mod extract_source;

pub use credentials::{Authenticator, Credential, CredentialProvider, SessionCredentialProvider};
pub use extract_source::{ExtractFetcher, ExtractSource, StaticExtract};
