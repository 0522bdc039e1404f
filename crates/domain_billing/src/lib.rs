//! Billing Domain - Commission Ledger
//!
//! This crate implements the commission side of a protection policy: how an
//! external payment attached to the policy is split between the agent and
//! the broker, how much is set aside for donation, and how each payee is paid
//! exactly once per split cycle through the funds transfer port.
//!
//! # Split arithmetic
//!
//! For an attached payment `W` in minor units:
//! - agent fee = `floor(W * agent% / 100)`
//! - broker fee = `floor(W * broker% / 100)`
//! - fee = agent fee + broker fee
//! - donation = `floor(W * donation% / 100)`
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{CommissionLedger, Payee};
//!
//! let mut ledger = CommissionLedger::new(Currency::USD);
//! ledger.set_fee_percents(Percent::new(8), Percent::new(7))?;
//! ledger.split(Money::from_minor(1_000_000_000, Currency::USD))?;
//! ledger.pay(Payee::Agent, agent_id, &mut book)?;
//! ```

pub mod commission;
pub mod payout;
pub mod book;
pub mod error;

pub use commission::{
    CommissionLedger, FeeSplit, Payee,
    MIN_FEE_PERCENT, MAX_FEE_PERCENT, DEFAULT_FEE_PERCENT,
    DEFAULT_DONATION_PERCENT, MAX_DONATION_PERCENT,
};
pub use payout::{CommissionPayout, PayoutSummary};
pub use book::SettlementBook;
pub use error::BillingError;
