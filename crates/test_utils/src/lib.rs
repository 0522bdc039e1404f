//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! policy test suites.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for the reference policy
//! - `builders`: Builder patterns for test data construction
//! - `transfer`: Recording fake of the funds transfer port
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod transfer;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use transfer::*;
pub use assertions::*;
pub use generators::*;
