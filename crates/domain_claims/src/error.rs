//! Claims domain errors

use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    /// Internal id zero is reserved
    #[error("Invalid claim id: {0}")]
    InvalidClaimId(u64),

    #[error("Invalid claim value: {0}")]
    InvalidClaimValue(String),

    #[error("Claim not found: {0}")]
    ClaimNotFound(u64),

    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch { expected: String, actual: String },

    #[error("Calculation error: {0}")]
    Calculation(#[from] MoneyError),
}
