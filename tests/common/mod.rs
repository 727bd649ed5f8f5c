//! Shared fixtures for the integration suites.
#![allow(dead_code)]

pub mod fixtures;
pub mod strategies;
pub mod targets;

#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use targets::*;
