//! Policy Aggregate Root
//!
//! The Policy aggregate is the consistency boundary for one device
//! protection policy: its record and balance, the commission ledger and
//! the claims registry all change only through the methods here.
//!
//! # Invariants
//!
//! - The policy balance never goes negative and never grows after issuance
//! - Every mutating call checks, in order: caller, terminal state, input.
//!   Nothing changes unless all checks pass
//! - A finalized policy accepts no further mutation of any kind
//! - Every successful mutation bumps `version` and records one event

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

use core_kernel::{Currency, FundsTransfer, Money, PartyId, Percent, PolicyId, TransferReceipt};
use domain_billing::{CommissionLedger, FeeSplit, Payee};
use domain_claims::{ClaimView, ClaimsRegistry, DocumentationChecklist};

use crate::access::{authorize, Operation, PolicyParties, Role};
use crate::error::PolicyError;
use crate::events::PolicyEvent;

/// Oldest insured age accepted at issuance
pub const MAX_INSURED_AGE: u8 = 150;

/// Policy lifecycle status
///
/// `InClaim` keeps its code for a future intermediate state; no operation
/// enters it today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PolicyStatus {
    Active = 0,
    InClaim = 1,
    Finalized = 2,
}

impl PolicyStatus {
    /// Numeric status code
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PolicyStatus::Finalized)
    }
}

impl TryFrom<u8> for PolicyStatus {
    type Error = PolicyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PolicyStatus::Active),
            1 => Ok(PolicyStatus::InClaim),
            2 => Ok(PolicyStatus::Finalized),
            other => Err(PolicyError::InvalidStatusCode(other)),
        }
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyStatus::Active => write!(f, "Active"),
            PolicyStatus::InClaim => write!(f, "InClaim"),
            PolicyStatus::Finalized => write!(f, "Finalized"),
        }
    }
}

/// The Policy aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Unique policy identifier
    id: PolicyId,
    /// Human-readable policy number
    policy_number: String,
    /// Customer, agent, broker and admin
    parties: PolicyParties,
    insured_name: String,
    insured_age: u8,
    device_model: String,
    /// Total insured value
    coverage_value: Money,
    /// Remaining claimable amount
    policy_balance: Money,
    deductible: Money,
    /// Policy currency
    currency: Currency,
    status: PolicyStatus,
    commissions: CommissionLedger,
    claims: ClaimsRegistry,
    /// Domain events to be published
    #[serde(skip)]
    events: Vec<PolicyEvent>,
    /// Incremented on every successful mutation
    version: u32,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl Policy {
    /// Returns the policy ID
    pub fn id(&self) -> PolicyId {
        self.id
    }

    /// Returns the policy number
    pub fn policy_number(&self) -> &str {
        &self.policy_number
    }

    pub fn parties(&self) -> &PolicyParties {
        &self.parties
    }

    pub fn customer(&self) -> PartyId {
        self.parties.customer
    }

    pub fn agent(&self) -> PartyId {
        self.parties.agent
    }

    pub fn broker(&self) -> PartyId {
        self.parties.broker
    }

    pub fn admin(&self) -> PartyId {
        self.parties.admin
    }

    /// Resolves the strongest role `caller` holds on this policy
    pub fn role_of(&self, caller: &PartyId) -> Option<Role> {
        self.parties.role_of(caller)
    }

    pub fn insured_name(&self) -> &str {
        &self.insured_name
    }

    pub fn insured_age(&self) -> u8 {
        self.insured_age
    }

    pub fn device_model(&self) -> &str {
        &self.device_model
    }

    pub fn coverage_value(&self) -> Money {
        self.coverage_value
    }

    /// Remaining claimable amount
    pub fn policy_balance(&self) -> Money {
        self.policy_balance
    }

    pub fn deductible(&self) -> Money {
        self.deductible
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn status(&self) -> PolicyStatus {
        self.status
    }

    /// Numeric status code (0 active, 1 in claim, 2 finalized)
    pub fn status_code(&self) -> u8 {
        self.status.code()
    }

    pub fn is_finalized(&self) -> bool {
        self.status.is_terminal()
    }

    /// Commission ledger, read-only
    pub fn commissions(&self) -> &CommissionLedger {
        &self.commissions
    }

    /// Claims registry, read-only
    pub fn claims(&self) -> &ClaimsRegistry {
        &self.claims
    }

    pub fn donation_percent(&self) -> Percent {
        self.commissions.donation_percent()
    }

    pub fn agent_fee_percent(&self) -> Percent {
        self.commissions.agent_fee_percent()
    }

    pub fn broker_fee_percent(&self) -> Percent {
        self.commissions.broker_fee_percent()
    }

    pub fn fee_percent(&self) -> Percent {
        self.commissions.fee_percent()
    }

    pub fn agent_fee_value(&self) -> Money {
        self.commissions.agent_fee_value()
    }

    pub fn broker_fee_value(&self) -> Money {
        self.commissions.broker_fee_value()
    }

    pub fn fee_value(&self) -> Money {
        self.commissions.fee_value()
    }

    pub fn donation_value(&self) -> Money {
        self.commissions.donation_value()
    }

    pub fn held_funds(&self) -> Money {
        self.commissions.held_funds()
    }

    pub fn is_agent_paid(&self) -> bool {
        self.commissions.is_agent_paid()
    }

    pub fn is_broker_paid(&self) -> bool {
        self.commissions.is_broker_paid()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns accumulated domain events and clears them
    pub fn take_events(&mut self) -> Vec<PolicyEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events recorded since the last `take_events`
    pub fn pending_events(&self) -> &[PolicyEvent] {
        &self.events
    }

    /// Overwrites the broker and agent fee percentages
    ///
    /// # Errors
    ///
    /// - `Unauthorized` unless the caller is the admin
    /// - `TerminalState` once finalized
    /// - `Billing(InvalidFeePercent)` if either value is outside `2..=100`;
    ///   neither percentage changes
    pub fn set_fee_commissions_percent(
        &mut self,
        caller: &PartyId,
        broker_percent: Percent,
        agent_percent: Percent,
    ) -> Result<(), PolicyError> {
        self.guard(Operation::SetFeeCommissions, caller)?;
        self.commissions.set_fee_percents(broker_percent, agent_percent)?;

        let now = Utc::now();
        self.record(now, PolicyEvent::CommissionPercentsChanged {
            policy_id: self.id,
            broker_percent,
            agent_percent,
            fee_percent: self.commissions.fee_percent(),
            timestamp: now,
        });
        Ok(())
    }

    /// Overwrites the donation percentage
    pub fn change_donation_value(&mut self, caller: &PartyId, donation_percent: Percent) -> Result<(), PolicyError> {
        self.guard(Operation::ChangeDonation, caller)?;
        self.commissions.set_donation_percent(donation_percent)?;

        let now = Utc::now();
        self.record(now, PolicyEvent::DonationPercentChanged {
            policy_id: self.id,
            donation_percent,
            timestamp: now,
        });
        Ok(())
    }

    /// Attaches an external payment and splits it between agent and broker
    ///
    /// The payment is held by the ledger; nothing is paid out here. A split
    /// opens a new payout cycle.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// policy.set_fee_commissions_percent(&admin, Percent::new(8), Percent::new(7))?;
    /// let split = policy.split_commissions_with_external_money(&admin, amount)?;
    /// assert_eq!(split.fee, policy.fee_value());
    /// ```
    pub fn split_commissions_with_external_money(
        &mut self,
        caller: &PartyId,
        amount: Money,
    ) -> Result<FeeSplit, PolicyError> {
        self.guard(Operation::SplitCommissions, caller)?;
        self.ensure_currency(&amount)?;
        let split = self.commissions.split(amount)?;

        let now = Utc::now();
        self.record(now, PolicyEvent::CommissionSplit {
            policy_id: self.id,
            amount: split.amount,
            agent_fee: split.agent_fee,
            broker_fee: split.broker_fee,
            donation: split.donation,
            cycle: self.commissions.split_cycles(),
            timestamp: now,
        });
        Ok(split)
    }

    /// Pays the agent's share of the latest split
    pub fn send_commission_splited_agent<T: FundsTransfer + ?Sized>(
        &mut self,
        caller: &PartyId,
        transfer: &mut T,
    ) -> Result<TransferReceipt, PolicyError> {
        self.pay_commission(Operation::PayAgentCommission, Payee::Agent, caller, transfer)
    }

    /// Pays the broker's share of the latest split
    pub fn send_commission_splited_broker<T: FundsTransfer + ?Sized>(
        &mut self,
        caller: &PartyId,
        transfer: &mut T,
    ) -> Result<TransferReceipt, PolicyError> {
        self.pay_commission(Operation::PayBrokerCommission, Payee::Broker, caller, transfer)
    }

    fn pay_commission<T: FundsTransfer + ?Sized>(
        &mut self,
        operation: Operation,
        payee: Payee,
        caller: &PartyId,
        transfer: &mut T,
    ) -> Result<TransferReceipt, PolicyError> {
        self.guard(operation, caller)?;

        let account = match payee {
            Payee::Agent => self.parties.agent,
            Payee::Broker => self.parties.broker,
        };
        let receipt = self.commissions.pay(payee, account, transfer)?;

        let now = Utc::now();
        self.record(now, PolicyEvent::CommissionPaid {
            policy_id: self.id,
            payee,
            account,
            amount: receipt.amount,
            transfer_id: receipt.transfer_id,
            timestamp: now,
        });
        Ok(receipt)
    }

    /// Files a first notice of loss against the policy balance
    ///
    /// The deduction is capped at the remaining balance; the amount actually
    /// deducted is returned. Filing again under the same id re-touches the
    /// claim.
    ///
    /// # Errors
    ///
    /// - `Claim(InvalidClaimId)` for id zero, `Claim(InvalidClaimValue)` for
    ///   a zero value
    /// - `InsufficientBalance` when the balance is already exhausted
    pub fn fnol(&mut self, caller: &PartyId, internal_id: u64, claim_value: Money) -> Result<Money, PolicyError> {
        self.guard(Operation::FileClaim, caller)?;
        self.claims.validate_filing(internal_id, &claim_value)?;

        if self.policy_balance.is_zero() {
            warn!(
                policy_id = %self.id,
                internal_id,
                requested = %claim_value.amount(),
                "Claim rejected: policy balance exhausted"
            );
            return Err(PolicyError::InsufficientBalance {
                internal_id,
                requested: claim_value,
                balance: self.policy_balance,
            });
        }

        let deducted = claim_value.min(&self.policy_balance)?;
        let remaining = self.policy_balance.checked_sub(&deducted)?;
        self.claims.file(internal_id, claim_value, deducted)?;
        self.policy_balance = remaining;

        let now = Utc::now();
        self.record(now, PolicyEvent::ClaimFiled {
            policy_id: self.id,
            internal_id,
            requested: claim_value,
            deducted,
            remaining,
            timestamp: now,
        });
        Ok(deducted)
    }

    /// Replaces the documentation checklist of a filed claim
    pub fn set_claim_documentation_work_flow(
        &mut self,
        caller: &PartyId,
        internal_id: u64,
        checklist: DocumentationChecklist,
    ) -> Result<(), PolicyError> {
        self.guard(Operation::UpdateClaimDocumentation, caller)?;
        self.claims.set_documentation(internal_id, checklist)?;

        let now = Utc::now();
        self.record(now, PolicyEvent::ClaimDocumentationUpdated {
            policy_id: self.id,
            internal_id,
            checklist,
            timestamp: now,
        });
        Ok(())
    }

    /// Claim tuple by id; unknown ids read as the default view
    pub fn claim(&self, internal_id: u64) -> ClaimView {
        self.claims.view(internal_id)
    }

    /// Whether the claim exists and every document has been received
    pub fn claim_settlement_ready(&self, internal_id: u64) -> bool {
        self.claims
            .get(internal_id)
            .map(|claim| claim.checklist.is_complete())
            .unwrap_or(false)
    }

    /// Finalizes the policy, freezing its status and balance
    pub fn finalize_policy(&mut self, caller: &PartyId) -> Result<(), PolicyError> {
        self.guard(Operation::FinalizePolicy, caller)?;

        self.status = PolicyStatus::Finalized;

        let now = Utc::now();
        self.record(now, PolicyEvent::StatusChanged {
            policy_id: self.id,
            status: self.status,
            balance: self.policy_balance,
            timestamp: now,
        });
        Ok(())
    }

    /// Caller check, then terminal state check
    fn guard(&self, operation: Operation, caller: &PartyId) -> Result<(), PolicyError> {
        authorize(operation, caller, &self.parties)?;

        if self.status.is_terminal() {
            warn!(policy_id = %self.id, operation = %operation, "Policy is finalized");
            return Err(PolicyError::TerminalState { operation });
        }
        Ok(())
    }

    fn ensure_currency(&self, amount: &Money) -> Result<(), PolicyError> {
        if amount.currency() != self.currency {
            return Err(PolicyError::CurrencyMismatch {
                expected: self.currency.to_string(),
                actual: amount.currency().to_string(),
            });
        }
        Ok(())
    }

    fn record(&mut self, now: DateTime<Utc>, event: PolicyEvent) {
        info!(
            policy_id = %self.id,
            event = event.event_type(),
            version = self.version + 1,
            "Policy updated"
        );
        self.version += 1;
        self.updated_at = now;
        self.events.push(event);
    }
}

/// Builder for issuing new policies
///
/// All ten parameters are required; currency defaults to USD.
///
/// # Example
///
/// ```rust,ignore
/// let policy = PolicyBuilder::new()
///     .customer(customer)
///     .insured_name("Alex Silva")
///     .insured_age(88)
///     .coverage_value(Money::from_minor(2280, Currency::USD))
///     .initial_balance(Money::from_minor(342, Currency::USD))
///     .deductible(Money::from_minor(70, Currency::USD))
///     .device_model("Samsung Galaxy S7")
///     .agent(agent)
///     .broker(broker)
///     .admin(admin)
///     .build()?;
/// ```
pub struct PolicyBuilder {
    customer: Option<PartyId>,
    insured_name: Option<String>,
    insured_age: Option<u8>,
    coverage_value: Option<Money>,
    initial_balance: Option<Money>,
    deductible: Option<Money>,
    device_model: Option<String>,
    agent: Option<PartyId>,
    broker: Option<PartyId>,
    admin: Option<PartyId>,
    currency: Currency,
}

impl PolicyBuilder {
    /// Creates a new policy builder with default values
    pub fn new() -> Self {
        Self {
            customer: None,
            insured_name: None,
            insured_age: None,
            coverage_value: None,
            initial_balance: None,
            deductible: None,
            device_model: None,
            agent: None,
            broker: None,
            admin: None,
            currency: Currency::USD,
        }
    }

    pub fn customer(mut self, party_id: PartyId) -> Self {
        self.customer = Some(party_id);
        self
    }

    pub fn insured_name(mut self, name: impl Into<String>) -> Self {
        self.insured_name = Some(name.into());
        self
    }

    pub fn insured_age(mut self, age: u8) -> Self {
        self.insured_age = Some(age);
        self
    }

    pub fn coverage_value(mut self, value: Money) -> Self {
        self.coverage_value = Some(value);
        self
    }

    /// Sets the claimable balance the policy starts with
    pub fn initial_balance(mut self, balance: Money) -> Self {
        self.initial_balance = Some(balance);
        self
    }

    pub fn deductible(mut self, deductible: Money) -> Self {
        self.deductible = Some(deductible);
        self
    }

    pub fn device_model(mut self, model: impl Into<String>) -> Self {
        self.device_model = Some(model.into());
        self
    }

    pub fn agent(mut self, party_id: PartyId) -> Self {
        self.agent = Some(party_id);
        self
    }

    pub fn broker(mut self, party_id: PartyId) -> Self {
        self.broker = Some(party_id);
        self
    }

    pub fn admin(mut self, party_id: PartyId) -> Self {
        self.admin = Some(party_id);
        self
    }

    /// Sets the currency
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Issues the policy
    ///
    /// # Errors
    ///
    /// - `MissingRequiredField` naming the first absent parameter
    /// - `Validation` for blank descriptive fields, an age outside
    ///   `1..=150`, zero coverage, a balance above coverage, or an admin
    ///   who is also agent or broker
    /// - `CurrencyMismatch` for an amount not in the policy currency
    pub fn build(self) -> Result<Policy, PolicyError> {
        let customer = self.customer
            .ok_or(PolicyError::MissingRequiredField("customer".to_string()))?;
        let insured_name = self.insured_name
            .ok_or(PolicyError::MissingRequiredField("insured_name".to_string()))?;
        let insured_age = self.insured_age
            .ok_or(PolicyError::MissingRequiredField("insured_age".to_string()))?;
        let coverage_value = self.coverage_value
            .ok_or(PolicyError::MissingRequiredField("coverage_value".to_string()))?;
        let initial_balance = self.initial_balance
            .ok_or(PolicyError::MissingRequiredField("initial_balance".to_string()))?;
        let deductible = self.deductible
            .ok_or(PolicyError::MissingRequiredField("deductible".to_string()))?;
        let device_model = self.device_model
            .ok_or(PolicyError::MissingRequiredField("device_model".to_string()))?;
        let agent = self.agent
            .ok_or(PolicyError::MissingRequiredField("agent".to_string()))?;
        let broker = self.broker
            .ok_or(PolicyError::MissingRequiredField("broker".to_string()))?;
        let admin = self.admin
            .ok_or(PolicyError::MissingRequiredField("admin".to_string()))?;

        let insured_name = insured_name.trim().to_string();
        let device_model = device_model.trim().to_string();
        if insured_name.is_empty() {
            return Err(PolicyError::validation("insured_name must not be blank"));
        }
        if device_model.is_empty() {
            return Err(PolicyError::validation("device_model must not be blank"));
        }
        if insured_age == 0 || insured_age > MAX_INSURED_AGE {
            return Err(PolicyError::validation(format!(
                "insured_age must be between 1 and {}",
                MAX_INSURED_AGE
            )));
        }

        for amount in [&coverage_value, &initial_balance, &deductible] {
            if amount.currency() != self.currency {
                return Err(PolicyError::CurrencyMismatch {
                    expected: self.currency.to_string(),
                    actual: amount.currency().to_string(),
                });
            }
        }
        if coverage_value.is_zero() {
            return Err(PolicyError::validation("coverage_value must be positive"));
        }
        if initial_balance.amount() > coverage_value.amount() {
            return Err(PolicyError::validation(
                "initial_balance must not exceed coverage_value",
            ));
        }

        if admin == agent || admin == broker {
            return Err(PolicyError::validation(
                "admin must differ from agent and broker",
            ));
        }

        let now = Utc::now();
        let policy_id = PolicyId::new_v7();
        let policy_number = generate_policy_number();

        info!(
            policy_id = %policy_id,
            policy_number = %policy_number,
            coverage_value = %coverage_value.amount(),
            policy_balance = %initial_balance.amount(),
            "Policy issued"
        );

        Ok(Policy {
            id: policy_id,
            events: vec![PolicyEvent::PolicyIssued {
                policy_id,
                policy_number: policy_number.clone(),
                customer,
                coverage_value,
                policy_balance: initial_balance,
                timestamp: now,
            }],
            policy_number,
            parties: PolicyParties {
                customer,
                agent,
                broker,
                admin,
            },
            insured_name,
            insured_age,
            device_model,
            coverage_value,
            policy_balance: initial_balance,
            deductible,
            currency: self.currency,
            status: PolicyStatus::Active,
            commissions: CommissionLedger::new(self.currency),
            claims: ClaimsRegistry::new(self.currency),
            version: 1,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a policy number
///
/// Format: SPP-{YEAR}{MONTH}-{SEQUENCE}
fn generate_policy_number() -> String {
    let now = Utc::now();
    format!(
        "SPP-{}{}-{:06}",
        now.format("%Y"),
        now.format("%m"),
        rand_sequence()
    )
}

/// Generates a pseudo-random sequence for policy numbers
fn rand_sequence() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (duration.as_nanos() % 1_000_000) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(minor: u64) -> Money {
        Money::from_minor(minor, Currency::USD)
    }

    fn create_test_policy() -> (Policy, PolicyParties) {
        let parties = PolicyParties {
            customer: PartyId::new(),
            agent: PartyId::new(),
            broker: PartyId::new(),
            admin: PartyId::new(),
        };
        let policy = PolicyBuilder::new()
            .customer(parties.customer)
            .insured_name("Alex Silva")
            .insured_age(88)
            .coverage_value(usd(2280))
            .initial_balance(usd(342))
            .deductible(usd(70))
            .device_model("Samsung Galaxy S7")
            .agent(parties.agent)
            .broker(parties.broker)
            .admin(parties.admin)
            .build()
            .unwrap();
        (policy, parties)
    }

    #[test]
    fn test_policy_creation() {
        let (policy, _) = create_test_policy();
        assert_eq!(policy.status(), PolicyStatus::Active);
        assert_eq!(policy.policy_balance().amount(), dec!(342));
        assert_eq!(policy.version(), 1);
        assert_eq!(policy.pending_events().len(), 1);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(PolicyStatus::Active.code(), 0);
        assert_eq!(PolicyStatus::InClaim.code(), 1);
        assert_eq!(PolicyStatus::try_from(2).unwrap(), PolicyStatus::Finalized);
        assert!(matches!(
            PolicyStatus::try_from(3),
            Err(PolicyError::InvalidStatusCode(3))
        ));
    }

    #[test]
    fn test_three_claims_exhaust_balance() {
        let (mut policy, parties) = create_test_policy();
        for id in 1..=3 {
            policy.fnol(&parties.customer, id, usd(114)).unwrap();
        }
        assert!(policy.policy_balance().is_zero());

        let result = policy.fnol(&parties.customer, 4, usd(1));
        assert!(matches!(result, Err(PolicyError::InsufficientBalance { .. })));
    }

    #[test]
    fn test_finalize_is_terminal() {
        let (mut policy, parties) = create_test_policy();
        policy.finalize_policy(&parties.admin).unwrap();

        let result = policy.finalize_policy(&parties.admin);
        assert!(matches!(result, Err(PolicyError::TerminalState { .. })));
        assert_eq!(policy.status_code(), 2);
    }
}
