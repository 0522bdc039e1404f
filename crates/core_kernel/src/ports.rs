//! Ports to external collaborators
//!
//! The policy core never moves value itself. Payouts go through the
//! `FundsTransfer` port; the host plugs in whatever settlement mechanism it
//! runs on (a bank rail, a chain transfer, an in-memory book for tests).
//!
//! ```rust,ignore
//! struct BankRail { /* ... */ }
//!
//! impl FundsTransfer for BankRail {
//!     fn transfer(&mut self, payee: PartyId, amount: Money) -> Result<TransferReceipt, PortError> {
//!         // submit the payment, map the provider's reference to a receipt
//!     }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifiers::{PartyId, TransferId};
use crate::money::Money;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The counterparty refused the transfer
    #[error("Transfer rejected: {message}")]
    Rejected {
        message: String,
    },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The external system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a Rejected error
    pub fn rejected(message: impl Into<String>) -> Self {
        PortError::Rejected {
            message: message.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::ServiceUnavailable { .. })
    }
}

/// Proof that a transfer settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Reference assigned by the transfer mechanism
    pub transfer_id: TransferId,
    /// Who received the funds
    pub payee: PartyId,
    /// How much was moved
    pub amount: Money,
    /// When the transfer settled
    pub settled_at: DateTime<Utc>,
}

impl TransferReceipt {
    /// Creates a receipt for a transfer settled now
    pub fn settled_now(payee: PartyId, amount: Money) -> Self {
        Self {
            transfer_id: TransferId::new_v7(),
            payee,
            amount,
            settled_at: Utc::now(),
        }
    }
}

/// The value-transfer primitive used to pay commissions
///
/// Implementations must be all-or-nothing: an `Err` means no funds moved.
pub trait FundsTransfer {
    /// Moves `amount` to `payee`
    fn transfer(&mut self, payee: PartyId, amount: Money) -> Result<TransferReceipt, PortError>;
}

impl<T: FundsTransfer + ?Sized> FundsTransfer for &mut T {
    fn transfer(&mut self, payee: PartyId, amount: Money) -> Result<TransferReceipt, PortError> {
        (**self).transfer(payee, amount)
    }
}

impl<T: FundsTransfer + ?Sized> FundsTransfer for Box<T> {
    fn transfer(&mut self, payee: PartyId, amount: Money) -> Result<TransferReceipt, PortError> {
        (**self).transfer(payee, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    struct Refusing;

    impl FundsTransfer for Refusing {
        fn transfer(&mut self, _payee: PartyId, _amount: Money) -> Result<TransferReceipt, PortError> {
            Err(PortError::rejected("account closed"))
        }
    }

    #[test]
    fn test_port_error_transient() {
        let unavailable = PortError::ServiceUnavailable {
            service: "bank-rail".to_string(),
        };
        assert!(unavailable.is_transient());
        assert!(!PortError::validation("bad payee").is_transient());
    }

    fn pay<T: FundsTransfer>(mut port: T) -> Result<TransferReceipt, PortError> {
        port.transfer(PartyId::new(), Money::from_minor(10, Currency::USD))
    }

    #[test]
    fn test_transfer_through_mut_reference() {
        let mut port = Refusing;
        let result = pay(&mut port);
        assert!(matches!(result, Err(PortError::Rejected { .. })));
    }

    #[test]
    fn test_receipt_settled_now() {
        let payee = PartyId::new();
        let receipt = TransferReceipt::settled_now(payee, Money::from_minor(500, Currency::EUR));
        assert_eq!(receipt.payee, payee);
        assert!(receipt.transfer_id.to_string().starts_with("TRF-"));
    }
}
