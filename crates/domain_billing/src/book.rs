//! In-memory settlement book
//!
//! A `FundsTransfer` adapter that settles transfers by crediting payee
//! accounts in a map. The API host uses it when no external rail is
//! configured; it also gives tests an observable payee balance.
//!
//! # Invariants
//!
//! - Only transfers in the book's currency are accepted
//! - Balances only grow; the book never debits a payee

use std::collections::HashMap;
use tracing::debug;

use core_kernel::{Currency, FundsTransfer, Money, PartyId, PortError, TransferReceipt};

/// Payee balances credited by settled transfers
#[derive(Debug, Clone)]
pub struct SettlementBook {
    currency: Currency,
    balances: HashMap<PartyId, Money>,
    receipts: Vec<TransferReceipt>,
}

impl SettlementBook {
    /// Creates an empty book for the given currency
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            balances: HashMap::new(),
            receipts: Vec::new(),
        }
    }

    /// Returns the amount credited to a party so far
    pub fn balance_of(&self, party: &PartyId) -> Money {
        self.balances
            .get(party)
            .copied()
            .unwrap_or_else(|| Money::zero(self.currency))
    }

    /// Returns every settled transfer, oldest first
    pub fn receipts(&self) -> &[TransferReceipt] {
        &self.receipts
    }
}

impl FundsTransfer for SettlementBook {
    fn transfer(&mut self, payee: PartyId, amount: Money) -> Result<TransferReceipt, PortError> {
        if amount.currency() != self.currency {
            return Err(PortError::validation(format!(
                "book settles {} only, got {}",
                self.currency,
                amount.currency()
            )));
        }

        let credited = self
            .balance_of(&payee)
            .checked_add(&amount)
            .map_err(|e| PortError::internal(e.to_string()))?;
        self.balances.insert(payee, credited);

        let receipt = TransferReceipt::settled_now(payee, amount);
        debug!(payee = %payee, amount = %amount.amount(), transfer_id = %receipt.transfer_id, "Transfer settled in book");
        self.receipts.push(receipt.clone());
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transfer_credits_payee() {
        let mut book = SettlementBook::new(Currency::USD);
        let payee = PartyId::new();

        book.transfer(payee, Money::from_minor(300, Currency::USD)).unwrap();
        book.transfer(payee, Money::from_minor(200, Currency::USD)).unwrap();

        assert_eq!(book.balance_of(&payee).amount(), dec!(500));
        assert_eq!(book.receipts().len(), 2);
    }

    #[test]
    fn test_foreign_currency_rejected() {
        let mut book = SettlementBook::new(Currency::USD);
        let payee = PartyId::new();

        let result = book.transfer(payee, Money::from_minor(300, Currency::EUR));
        assert!(matches!(result, Err(PortError::Validation { .. })));
        assert!(book.balance_of(&payee).is_zero());
    }
}
