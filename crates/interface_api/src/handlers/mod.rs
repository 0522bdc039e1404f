//! Route handlers

pub mod claims;
pub mod commissions;
pub mod health;
pub mod policy;
