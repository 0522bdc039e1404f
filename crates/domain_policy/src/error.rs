//! Policy domain errors
//!
//! This module defines all error types that can occur within the
//! policy domain, and the coarse taxonomy hosts use to map them onto
//! their own status codes.

use thiserror::Error;

use core_kernel::{Money, MoneyError, PartyId};
use domain_billing::BillingError;
use domain_claims::ClaimError;

use crate::access::Operation;

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Caller may not run the operation
    #[error("Caller {caller} is not authorized to call {operation}")]
    Unauthorized {
        operation: Operation,
        caller: PartyId,
    },

    /// Policy is finalized; nothing may change any more
    #[error("Policy is finalized: {operation} rejected")]
    TerminalState {
        operation: Operation,
    },

    /// Required field is missing
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Currency mismatch between policy and amount
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        expected: String,
        actual: String,
    },

    /// No balance left to settle a claim
    #[error("Insufficient policy balance for claim {internal_id}: requested {requested}, balance {balance}")]
    InsufficientBalance {
        internal_id: u64,
        requested: Money,
        balance: Money,
    },

    /// Unknown status code
    #[error("Invalid status code: {0}")]
    InvalidStatusCode(u8),

    /// Commission ledger error
    #[error(transparent)]
    Billing(#[from] BillingError),

    /// Claims registry error
    #[error(transparent)]
    Claim(#[from] ClaimError),

    /// Financial calculation error
    #[error("Financial error: {0}")]
    Financial(#[from] MoneyError),
}

/// Coarse classification of policy errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authorization,
    Validation,
    NotFound,
    InsufficientBalance,
    DoublePayment,
    InsufficientFunds,
    TransferFailed,
    TerminalState,
    Internal,
}

impl PolicyError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PolicyError::Validation(message.into())
    }

    /// Classifies the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PolicyError::Unauthorized { .. } => ErrorKind::Authorization,
            PolicyError::TerminalState { .. } => ErrorKind::TerminalState,
            PolicyError::MissingRequiredField(_)
            | PolicyError::Validation(_)
            | PolicyError::CurrencyMismatch { .. }
            | PolicyError::InvalidStatusCode(_) => ErrorKind::Validation,
            PolicyError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            PolicyError::Billing(err) => match err {
                BillingError::AlreadyPaid(_) => ErrorKind::DoublePayment,
                BillingError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
                BillingError::Transfer(_) => ErrorKind::TransferFailed,
                BillingError::Calculation(_) => ErrorKind::Internal,
                BillingError::InvalidFeePercent { .. }
                | BillingError::InvalidDonationPercent { .. }
                | BillingError::InvalidAmount(_)
                | BillingError::CurrencyMismatch { .. }
                | BillingError::NothingToPay(_) => ErrorKind::Validation,
            },
            PolicyError::Claim(err) => match err {
                ClaimError::ClaimNotFound(_) => ErrorKind::NotFound,
                ClaimError::Calculation(_) => ErrorKind::Internal,
                ClaimError::InvalidClaimId(_)
                | ClaimError::InvalidClaimValue(_)
                | ClaimError::CurrencyMismatch { .. } => ErrorKind::Validation,
            },
            PolicyError::Financial(MoneyError::Overflow) => ErrorKind::Internal,
            PolicyError::Financial(_) => ErrorKind::Validation,
        }
    }
}
