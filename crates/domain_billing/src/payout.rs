//! Commission payout records
//!
//! Every settled commission transfer leaves a record on the ledger so the
//! payout history of a policy can be audited after the fact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, MoneyError, PartyId, TransferId, TransferReceipt};
use crate::commission::Payee;

/// A settled commission payout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionPayout {
    /// Which commission was paid
    pub payee: Payee,
    /// Account that received the funds
    pub account: PartyId,
    /// Amount transferred
    pub amount: Money,
    /// Split cycle the payout belongs to
    pub cycle: u32,
    /// Reference returned by the transfer port
    pub transfer_id: TransferId,
    /// Settlement time reported by the transfer port
    pub paid_at: DateTime<Utc>,
}

impl CommissionPayout {
    /// Creates a payout record from a transfer receipt
    ///
    /// # Arguments
    ///
    /// * `payee` - Agent or broker
    /// * `cycle` - Split cycle being paid
    /// * `receipt` - Receipt returned by the transfer port
    pub fn from_receipt(payee: Payee, cycle: u32, receipt: &TransferReceipt) -> Self {
        Self {
            payee,
            account: receipt.payee,
            amount: receipt.amount,
            cycle,
            transfer_id: receipt.transfer_id,
            paid_at: receipt.settled_at,
        }
    }
}

/// Payout totals per payee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutSummary {
    pub agent_total: Money,
    pub broker_total: Money,
    pub payouts: usize,
}

impl PayoutSummary {
    /// Sums a payout history
    pub fn from_payouts(currency: Currency, payouts: &[CommissionPayout]) -> Result<Self, MoneyError> {
        let mut agent_total = Money::zero(currency);
        let mut broker_total = Money::zero(currency);

        for payout in payouts {
            match payout.payee {
                Payee::Agent => agent_total = agent_total.checked_add(&payout.amount)?,
                Payee::Broker => broker_total = broker_total.checked_add(&payout.amount)?,
            }
        }

        Ok(Self {
            agent_total,
            broker_total,
            payouts: payouts.len(),
        })
    }
}
