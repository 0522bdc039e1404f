//! Domain events for the policy aggregate
//!
//! Every successful mutation records exactly one event. The service layer
//! drains them with `Policy::take_events` and hands them to the event bus;
//! the aggregate itself never talks to subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, PartyId, Percent, PolicyId, TransferId};
use domain_billing::Payee;
use domain_claims::DocumentationChecklist;

use crate::aggregate::PolicyStatus;

/// Domain events emitted by the Policy aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PolicyEvent {
    /// Policy has been issued
    PolicyIssued {
        policy_id: PolicyId,
        policy_number: String,
        customer: PartyId,
        coverage_value: Money,
        policy_balance: Money,
        timestamp: DateTime<Utc>,
    },

    /// Agent and broker fee percentages overwritten
    CommissionPercentsChanged {
        policy_id: PolicyId,
        broker_percent: Percent,
        agent_percent: Percent,
        fee_percent: Percent,
        timestamp: DateTime<Utc>,
    },

    /// Donation percentage overwritten
    DonationPercentChanged {
        policy_id: PolicyId,
        donation_percent: Percent,
        timestamp: DateTime<Utc>,
    },

    /// External payment attached and split
    CommissionSplit {
        policy_id: PolicyId,
        amount: Money,
        agent_fee: Money,
        broker_fee: Money,
        donation: Money,
        cycle: u32,
        timestamp: DateTime<Utc>,
    },

    /// Commission transferred to a payee
    CommissionPaid {
        policy_id: PolicyId,
        payee: Payee,
        account: PartyId,
        amount: Money,
        transfer_id: TransferId,
        timestamp: DateTime<Utc>,
    },

    /// First notice of loss registered
    ClaimFiled {
        policy_id: PolicyId,
        internal_id: u64,
        requested: Money,
        deducted: Money,
        remaining: Money,
        timestamp: DateTime<Utc>,
    },

    /// Claim documentation replaced
    ClaimDocumentationUpdated {
        policy_id: PolicyId,
        internal_id: u64,
        checklist: DocumentationChecklist,
        timestamp: DateTime<Utc>,
    },

    /// Policy status changed
    StatusChanged {
        policy_id: PolicyId,
        status: PolicyStatus,
        balance: Money,
        timestamp: DateTime<Utc>,
    },
}

impl PolicyEvent {
    /// Returns the policy ID associated with this event
    pub fn policy_id(&self) -> PolicyId {
        match self {
            PolicyEvent::PolicyIssued { policy_id, .. }
            | PolicyEvent::CommissionPercentsChanged { policy_id, .. }
            | PolicyEvent::DonationPercentChanged { policy_id, .. }
            | PolicyEvent::CommissionSplit { policy_id, .. }
            | PolicyEvent::CommissionPaid { policy_id, .. }
            | PolicyEvent::ClaimFiled { policy_id, .. }
            | PolicyEvent::ClaimDocumentationUpdated { policy_id, .. }
            | PolicyEvent::StatusChanged { policy_id, .. } => *policy_id,
        }
    }

    /// Returns the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            PolicyEvent::PolicyIssued { timestamp, .. }
            | PolicyEvent::CommissionPercentsChanged { timestamp, .. }
            | PolicyEvent::DonationPercentChanged { timestamp, .. }
            | PolicyEvent::CommissionSplit { timestamp, .. }
            | PolicyEvent::CommissionPaid { timestamp, .. }
            | PolicyEvent::ClaimFiled { timestamp, .. }
            | PolicyEvent::ClaimDocumentationUpdated { timestamp, .. }
            | PolicyEvent::StatusChanged { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            PolicyEvent::PolicyIssued { .. } => "PolicyIssued",
            PolicyEvent::CommissionPercentsChanged { .. } => "CommissionPercentsChanged",
            PolicyEvent::DonationPercentChanged { .. } => "DonationPercentChanged",
            PolicyEvent::CommissionSplit { .. } => "CommissionSplit",
            PolicyEvent::CommissionPaid { .. } => "CommissionPaid",
            PolicyEvent::ClaimFiled { .. } => "ClaimFiled",
            PolicyEvent::ClaimDocumentationUpdated { .. } => "ClaimDocumentationUpdated",
            PolicyEvent::StatusChanged { .. } => "StatusChanged",
        }
    }
}
