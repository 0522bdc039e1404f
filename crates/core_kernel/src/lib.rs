//! Core Kernel - Foundational types for the protection policy workspace
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Money in whole minor units with exact percentage arithmetic
//! - Strongly typed identifiers for the policy, parties and transfers
//! - The funds transfer port used to pay commissions

pub mod money;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError, Percent};
pub use identifiers::{IdError, PolicyId, PartyId, TransferId, SubscriptionId};
pub use ports::{FundsTransfer, TransferReceipt, PortError};
