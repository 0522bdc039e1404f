//! Claims Domain
//!
//! This crate implements the claims side of a device protection policy:
//! first notice of loss (FNOL) registration keyed by the caller's internal
//! claim id, and the documentation checklist that gates settlement.
//!
//! # Claim Lifecycle
//!
//! ```text
//! FNOL -> documentation updates (full replace) -> checklist complete
//! ```
//!
//! A repeated FNOL against the same id re-touches the claim: totals and the
//! filing count grow, the checklist is kept.

pub mod claim;
pub mod registry;
pub mod workflow;
pub mod error;

pub use claim::{Claim, ClaimView};
pub use registry::ClaimsRegistry;
pub use workflow::{ClaimDocument, DocumentationChecklist};
pub use error::ClaimError;
