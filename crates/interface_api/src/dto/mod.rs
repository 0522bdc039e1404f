//! Request and response bodies

pub mod claims;
pub mod commissions;
pub mod policy;
