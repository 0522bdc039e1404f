//! Commission ledger
//!
//! Tracks how incoming payments attached to a policy are split between the
//! agent and the broker, the donation set-aside, and the funds held until
//! each payee is paid.
//!
//! # Invariants
//!
//! - Setter calls are atomic: an invalid value on either side leaves every
//!   percentage and derived value untouched
//! - Fee values reflect only the most recent split; they are never accumulated
//! - Each payee is paid at most once per split cycle
//! - Held funds never go negative; a payout that held funds cannot cover is
//!   refused before the transfer port is called

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use core_kernel::{Currency, FundsTransfer, Money, PartyId, Percent, TransferReceipt};
use crate::error::BillingError;
use crate::payout::{CommissionPayout, PayoutSummary};

/// Smallest percentage the fee setter accepts for either payee
pub const MIN_FEE_PERCENT: Percent = Percent::new(2);
/// Largest percentage the fee setter accepts for either payee
pub const MAX_FEE_PERCENT: Percent = Percent::new(100);
/// Fee percentage each payee starts with at issuance
pub const DEFAULT_FEE_PERCENT: Percent = Percent::new(1);
/// Donation percentage at issuance
pub const DEFAULT_DONATION_PERCENT: Percent = Percent::new(2);
/// Largest donation percentage accepted
pub const MAX_DONATION_PERCENT: Percent = Percent::new(100);

/// Who receives a commission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payee {
    Agent,
    Broker,
}

impl fmt::Display for Payee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payee::Agent => write!(f, "agent"),
            Payee::Broker => write!(f, "broker"),
        }
    }
}

/// Result of splitting one external payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    /// The attached payment
    pub amount: Money,
    /// Agent's share
    pub agent_fee: Money,
    /// Broker's share
    pub broker_fee: Money,
    /// Agent plus broker
    pub fee: Money,
    /// Donation set-aside
    pub donation: Money,
}

/// Fee configuration, computed fee values and payout state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionLedger {
    currency: Currency,
    agent_fee_percent: Percent,
    broker_fee_percent: Percent,
    donation_percent: Percent,
    agent_fee_value: Money,
    broker_fee_value: Money,
    fee_value: Money,
    donation_value: Money,
    held_funds: Money,
    agent_paid: bool,
    broker_paid: bool,
    split_cycles: u32,
    last_split_at: Option<DateTime<Utc>>,
    payouts: Vec<CommissionPayout>,
}

impl CommissionLedger {
    /// Creates a ledger with the issuance defaults
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            agent_fee_percent: DEFAULT_FEE_PERCENT,
            broker_fee_percent: DEFAULT_FEE_PERCENT,
            donation_percent: DEFAULT_DONATION_PERCENT,
            agent_fee_value: Money::zero(currency),
            broker_fee_value: Money::zero(currency),
            fee_value: Money::zero(currency),
            donation_value: Money::zero(currency),
            held_funds: Money::zero(currency),
            agent_paid: false,
            broker_paid: false,
            split_cycles: 0,
            last_split_at: None,
            payouts: Vec::new(),
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn agent_fee_percent(&self) -> Percent {
        self.agent_fee_percent
    }

    pub fn broker_fee_percent(&self) -> Percent {
        self.broker_fee_percent
    }

    /// Combined fee percentage, always agent plus broker
    pub fn fee_percent(&self) -> Percent {
        Percent::new(self.agent_fee_percent.value() + self.broker_fee_percent.value())
    }

    pub fn donation_percent(&self) -> Percent {
        self.donation_percent
    }

    pub fn agent_fee_value(&self) -> Money {
        self.agent_fee_value
    }

    pub fn broker_fee_value(&self) -> Money {
        self.broker_fee_value
    }

    pub fn fee_value(&self) -> Money {
        self.fee_value
    }

    pub fn donation_value(&self) -> Money {
        self.donation_value
    }

    /// Funds attached by splits and not yet paid out
    pub fn held_funds(&self) -> Money {
        self.held_funds
    }

    pub fn is_agent_paid(&self) -> bool {
        self.agent_paid
    }

    pub fn is_broker_paid(&self) -> bool {
        self.broker_paid
    }

    /// Number of funded split cycles so far
    pub fn split_cycles(&self) -> u32 {
        self.split_cycles
    }

    pub fn last_split_at(&self) -> Option<DateTime<Utc>> {
        self.last_split_at
    }

    /// Settled payouts, oldest first
    pub fn payouts(&self) -> &[CommissionPayout] {
        &self.payouts
    }

    /// Totals paid to each payee across all cycles
    pub fn payout_summary(&self) -> Result<PayoutSummary, BillingError> {
        Ok(PayoutSummary::from_payouts(self.currency, &self.payouts)?)
    }

    /// Returns whether the payee was paid in the current cycle
    pub fn is_paid(&self, payee: Payee) -> bool {
        match payee {
            Payee::Agent => self.agent_paid,
            Payee::Broker => self.broker_paid,
        }
    }

    /// Returns the payee's share of the most recent split
    pub fn fee_value_for(&self, payee: Payee) -> Money {
        match payee {
            Payee::Agent => self.agent_fee_value,
            Payee::Broker => self.broker_fee_value,
        }
    }

    /// Checks a pair of fee percentages without touching the ledger
    ///
    /// # Errors
    ///
    /// Returns `InvalidFeePercent` for the first value outside
    /// `MIN_FEE_PERCENT..=MAX_FEE_PERCENT`, broker first.
    pub fn validate_fee_percents(broker: Percent, agent: Percent) -> Result<(), BillingError> {
        for (payee, value) in [(Payee::Broker, broker), (Payee::Agent, agent)] {
            if value < MIN_FEE_PERCENT || value > MAX_FEE_PERCENT {
                return Err(BillingError::InvalidFeePercent {
                    payee,
                    value,
                    min: MIN_FEE_PERCENT,
                    max: MAX_FEE_PERCENT,
                });
            }
        }
        Ok(())
    }

    /// Overwrites both fee percentages
    ///
    /// # Errors
    ///
    /// Rejects the whole call if either value is out of range.
    pub fn set_fee_percents(&mut self, broker: Percent, agent: Percent) -> Result<(), BillingError> {
        Self::validate_fee_percents(broker, agent)?;

        self.broker_fee_percent = broker;
        self.agent_fee_percent = agent;

        info!(
            broker_percent = broker.value(),
            agent_percent = agent.value(),
            fee_percent = self.fee_percent().value(),
            "Commission percentages updated"
        );
        Ok(())
    }

    /// Checks a donation percentage without touching the ledger
    pub fn validate_donation_percent(value: Percent) -> Result<(), BillingError> {
        if value > MAX_DONATION_PERCENT {
            return Err(BillingError::InvalidDonationPercent {
                value,
                max: MAX_DONATION_PERCENT,
            });
        }
        Ok(())
    }

    /// Overwrites the donation percentage
    pub fn set_donation_percent(&mut self, value: Percent) -> Result<(), BillingError> {
        Self::validate_donation_percent(value)?;
        self.donation_percent = value;
        info!(donation_percent = value.value(), "Donation percentage updated");
        Ok(())
    }

    /// Computes the split of `amount` under the current percentages
    ///
    /// Each share is `floor(amount * percent / 100)`. Pure; the ledger is not
    /// modified.
    pub fn preview_split(&self, amount: Money) -> Result<FeeSplit, BillingError> {
        if amount.currency() != self.currency {
            return Err(BillingError::CurrencyMismatch {
                expected: self.currency.to_string(),
                actual: amount.currency().to_string(),
            });
        }
        if !amount.is_positive() {
            return Err(BillingError::InvalidAmount(
                "attached payment must be positive".to_string(),
            ));
        }

        let agent_fee = self.agent_fee_percent.apply_floor(&amount)?;
        let broker_fee = self.broker_fee_percent.apply_floor(&amount)?;
        let fee = agent_fee.checked_add(&broker_fee)?;
        let donation = self.donation_percent.apply_floor(&amount)?;

        Ok(FeeSplit {
            amount,
            agent_fee,
            broker_fee,
            fee,
            donation,
        })
    }

    /// Splits an attached payment and holds it pending payout
    ///
    /// Overwrites the fee values, adds the payment to held funds and opens a
    /// new payout cycle (both paid flags reset).
    pub fn split(&mut self, amount: Money) -> Result<FeeSplit, BillingError> {
        let split = self.preview_split(amount)?;
        let held_funds = self.held_funds.checked_add(&amount)?;

        debug!(
            amount = %split.amount.amount(),
            agent_fee = %split.agent_fee.amount(),
            broker_fee = %split.broker_fee.amount(),
            donation = %split.donation.amount(),
            "Computed commission split"
        );

        self.agent_fee_value = split.agent_fee;
        self.broker_fee_value = split.broker_fee;
        self.fee_value = split.fee;
        self.donation_value = split.donation;
        self.held_funds = held_funds;
        self.agent_paid = false;
        self.broker_paid = false;
        self.split_cycles += 1;
        self.last_split_at = Some(Utc::now());

        info!(
            cycle = self.split_cycles,
            fee_value = %split.fee.amount(),
            held_funds = %held_funds.amount(),
            "External payment split"
        );
        Ok(split)
    }

    /// Checks that a payout could go ahead and returns the amount due
    pub fn payout_due(&self, payee: Payee) -> Result<Money, BillingError> {
        if self.is_paid(payee) {
            return Err(BillingError::AlreadyPaid(payee));
        }

        let due = self.fee_value_for(payee);
        if due.is_zero() {
            return Err(BillingError::NothingToPay(payee));
        }

        if due.amount() > self.held_funds.amount() {
            return Err(BillingError::InsufficientFunds {
                required: due,
                held: self.held_funds,
            });
        }

        Ok(due)
    }

    /// Pays the payee's commission through the transfer port
    ///
    /// The paid flag flips and held funds drop only after the port confirms
    /// the transfer.
    ///
    /// # Errors
    ///
    /// - `AlreadyPaid` on a repeat call within the same cycle
    /// - `NothingToPay` when no funded split produced a fee for the payee
    /// - `InsufficientFunds` when held funds cannot cover the fee
    /// - `Transfer` when the port refuses
    pub fn pay<T: FundsTransfer + ?Sized>(
        &mut self,
        payee: Payee,
        account: PartyId,
        transfer: &mut T,
    ) -> Result<TransferReceipt, BillingError> {
        let due = self.payout_due(payee)?;
        let remaining = self.held_funds.checked_sub(&due)?;

        let receipt = transfer.transfer(account, due)?;

        self.held_funds = remaining;
        match payee {
            Payee::Agent => self.agent_paid = true,
            Payee::Broker => self.broker_paid = true,
        }
        self.payouts.push(CommissionPayout::from_receipt(payee, self.split_cycles, &receipt));

        info!(
            payee = %payee,
            amount = %due.amount(),
            transfer_id = %receipt.transfer_id,
            held_funds = %remaining.amount(),
            "Commission paid"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::PortError;
    use rust_decimal_macros::dec;

    struct AlwaysSettles;

    impl FundsTransfer for AlwaysSettles {
        fn transfer(&mut self, payee: PartyId, amount: Money) -> Result<TransferReceipt, PortError> {
            Ok(TransferReceipt::settled_now(payee, amount))
        }
    }

    fn usd(minor: u64) -> Money {
        Money::from_minor(minor, Currency::USD)
    }

    #[test]
    fn test_defaults() {
        let ledger = CommissionLedger::new(Currency::USD);
        assert_eq!(ledger.agent_fee_percent(), Percent::new(1));
        assert_eq!(ledger.broker_fee_percent(), Percent::new(1));
        assert_eq!(ledger.fee_percent(), Percent::new(2));
        assert_eq!(ledger.donation_percent(), Percent::new(2));
        assert!(!ledger.is_agent_paid());
        assert!(!ledger.is_broker_paid());
    }

    #[test]
    fn test_invalid_percent_leaves_ledger_unchanged() {
        let mut ledger = CommissionLedger::new(Currency::USD);
        let result = ledger.set_fee_percents(Percent::new(8), Percent::new(0));
        assert!(matches!(
            result,
            Err(BillingError::InvalidFeePercent { payee: Payee::Agent, .. })
        ));
        assert_eq!(ledger.fee_percent(), Percent::new(2));
    }

    #[test]
    fn test_split_and_pay() {
        let mut ledger = CommissionLedger::new(Currency::USD);
        ledger.set_fee_percents(Percent::new(8), Percent::new(7)).unwrap();
        ledger.split(usd(1000000000)).unwrap();

        assert_eq!(ledger.agent_fee_value().amount(), dec!(70000000));
        assert_eq!(ledger.broker_fee_value().amount(), dec!(80000000));
        assert_eq!(ledger.fee_value().amount(), dec!(150000000));

        let mut port = AlwaysSettles;
        ledger.pay(Payee::Agent, PartyId::new(), &mut port).unwrap();
        assert!(ledger.is_agent_paid());
        assert_eq!(ledger.held_funds().amount(), dec!(930000000));

        let again = ledger.pay(Payee::Agent, PartyId::new(), &mut port);
        assert!(matches!(again, Err(BillingError::AlreadyPaid(Payee::Agent))));
    }
}
