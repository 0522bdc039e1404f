//! Billing domain errors

use thiserror::Error;

use core_kernel::{Money, MoneyError, Percent, PortError};
use crate::commission::Payee;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// A fee percentage outside the accepted range
    #[error("Invalid {payee} fee percent {value}: must be between {min} and {max}")]
    InvalidFeePercent {
        payee: Payee,
        value: Percent,
        min: Percent,
        max: Percent,
    },

    /// A donation percentage outside the accepted range
    #[error("Invalid donation percent {value}: must not exceed {max}")]
    InvalidDonationPercent {
        value: Percent,
        max: Percent,
    },

    /// Payment amount is not acceptable
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Payment is in a different currency than the ledger
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        expected: String,
        actual: String,
    },

    /// Commission already paid in the current split cycle
    #[error("Commission already paid to {0}")]
    AlreadyPaid(Payee),

    /// No commission computed for the payee
    #[error("No commission to pay to {0}")]
    NothingToPay(Payee),

    /// Held funds do not cover the payout
    #[error("Insufficient held funds: required {required}, held {held}")]
    InsufficientFunds {
        required: Money,
        held: Money,
    },

    /// Transfer port failed
    #[error("Transfer failed: {0}")]
    Transfer(#[from] PortError),

    /// Calculation error
    #[error("Calculation error: {0}")]
    Calculation(#[from] MoneyError),
}

impl BillingError {
    /// Returns true if the error came from the payout guard against paying twice
    pub fn is_double_payment(&self) -> bool {
        matches!(self, BillingError::AlreadyPaid(_))
    }
}
