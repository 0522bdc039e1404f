//! Access control gate
//!
//! Every mutating operation on a policy is checked here before anything
//! else happens. A caller resolves to the strongest role it holds on the
//! policy; administrative operations require the admin role, the rest are
//! open to any caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use core_kernel::PartyId;
use crate::error::PolicyError;

/// Role a party holds on the policy
///
/// Ordered by priority: a party holding several roles acts with the
/// highest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Broker,
    Agent,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Broker => write!(f, "broker"),
            Role::Agent => write!(f, "agent"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Who may run an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Only the policy admin
    Admin,
    /// Any caller, including parties with no role on the policy
    Any,
}

/// Every mutating operation on a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    SetFeeCommissions,
    ChangeDonation,
    SplitCommissions,
    PayAgentCommission,
    PayBrokerCommission,
    FileClaim,
    UpdateClaimDocumentation,
    FinalizePolicy,
}

impl Operation {
    pub fn access(&self) -> Access {
        match self {
            Operation::SetFeeCommissions
            | Operation::ChangeDonation
            | Operation::SplitCommissions
            | Operation::FinalizePolicy => Access::Admin,
            Operation::PayAgentCommission
            | Operation::PayBrokerCommission
            | Operation::FileClaim
            | Operation::UpdateClaimDocumentation => Access::Any,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::SetFeeCommissions => "set_fee_commissions_percent",
            Operation::ChangeDonation => "change_donation_value",
            Operation::SplitCommissions => "split_commissions_with_external_money",
            Operation::PayAgentCommission => "send_commission_splited_agent",
            Operation::PayBrokerCommission => "send_commission_splited_broker",
            Operation::FileClaim => "fnol",
            Operation::UpdateClaimDocumentation => "set_claim_documentation_work_flow",
            Operation::FinalizePolicy => "finalize_policy",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The distinguished identities of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyParties {
    pub customer: PartyId,
    pub agent: PartyId,
    pub broker: PartyId,
    pub admin: PartyId,
}

impl PolicyParties {
    /// Resolves the strongest role the caller holds, if any
    pub fn role_of(&self, caller: &PartyId) -> Option<Role> {
        [
            (self.admin, Role::Admin),
            (self.agent, Role::Agent),
            (self.broker, Role::Broker),
            (self.customer, Role::Customer),
        ]
        .into_iter()
        .find(|(party, _)| party == caller)
        .map(|(_, role)| role)
    }
}

/// Checks that `caller` may run `operation`
///
/// Returns the caller's role on success; `None` means the caller holds no
/// role but the operation is open to anyone.
///
/// # Errors
///
/// Returns `Unauthorized` when an admin operation is called by anyone else.
pub fn authorize(
    operation: Operation,
    caller: &PartyId,
    parties: &PolicyParties,
) -> Result<Option<Role>, PolicyError> {
    let role = parties.role_of(caller);

    match (operation.access(), role) {
        (Access::Any, role) => Ok(role),
        (Access::Admin, Some(Role::Admin)) => Ok(role),
        (Access::Admin, _) => {
            warn!(operation = %operation, caller = %caller, "Unauthorized caller rejected");
            Err(PolicyError::Unauthorized {
                operation,
                caller: *caller,
            })
        }
    }
}
