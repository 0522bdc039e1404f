//! Policy domain services
//!
//! `PolicyService` owns one policy aggregate together with the event bus
//! and the funds transfer port. Hosts call it instead of the aggregate so
//! that every successful mutation is published right away.

use tracing::warn;

use core_kernel::{FundsTransfer, Money, PartyId, Percent, SubscriptionId, TransferReceipt};
use domain_billing::FeeSplit;
use domain_claims::DocumentationChecklist;

use crate::access::Operation;
use crate::aggregate::Policy;
use crate::error::PolicyError;
use crate::events::PolicyEvent;
use crate::notifier::EventBus;

/// Application service around a single policy
///
/// # Example
///
/// ```rust,ignore
/// let mut service = PolicyService::new(policy, SettlementBook::new(Currency::USD));
/// service.subscribe(|event| println!("{}", event.event_type()));
/// service.split_commissions_with_external_money(&admin, amount)?;
/// service.send_commission_splited_agent(&admin)?;
/// ```
#[derive(Debug)]
pub struct PolicyService<T> {
    policy: Policy,
    bus: EventBus,
    transfer: T,
}

impl<T: FundsTransfer> PolicyService<T> {
    /// Wraps an issued policy
    ///
    /// The issuance event stays pending until the first publish, so
    /// subscribers registered before then still see it.
    pub fn new(policy: Policy, transfer: T) -> Self {
        Self {
            policy,
            bus: EventBus::new(),
            transfer,
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// The transfer port used for payouts
    pub fn transfer(&self) -> &T {
        &self.transfer
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&PolicyEvent) + Send + Sync + 'static,
    {
        self.bus.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Publishes every pending event, including the issuance event
    pub fn flush_events(&mut self) -> usize {
        let events = self.policy.take_events();
        self.bus.publish_all(&events)
    }

    pub fn set_fee_commissions_percent(
        &mut self,
        caller: &PartyId,
        broker_percent: Percent,
        agent_percent: Percent,
    ) -> Result<(), PolicyError> {
        let result = self
            .policy
            .set_fee_commissions_percent(caller, broker_percent, agent_percent);
        self.settle(Operation::SetFeeCommissions, caller, result)
    }

    pub fn change_donation_value(&mut self, caller: &PartyId, donation_percent: Percent) -> Result<(), PolicyError> {
        let result = self.policy.change_donation_value(caller, donation_percent);
        self.settle(Operation::ChangeDonation, caller, result)
    }

    pub fn split_commissions_with_external_money(
        &mut self,
        caller: &PartyId,
        amount: Money,
    ) -> Result<FeeSplit, PolicyError> {
        let result = self.policy.split_commissions_with_external_money(caller, amount);
        self.settle(Operation::SplitCommissions, caller, result)
    }

    pub fn send_commission_splited_agent(&mut self, caller: &PartyId) -> Result<TransferReceipt, PolicyError> {
        let result = self
            .policy
            .send_commission_splited_agent(caller, &mut self.transfer);
        self.settle(Operation::PayAgentCommission, caller, result)
    }

    pub fn send_commission_splited_broker(&mut self, caller: &PartyId) -> Result<TransferReceipt, PolicyError> {
        let result = self
            .policy
            .send_commission_splited_broker(caller, &mut self.transfer);
        self.settle(Operation::PayBrokerCommission, caller, result)
    }

    /// Files a claim; returns the amount deducted from the balance
    pub fn fnol(&mut self, caller: &PartyId, internal_id: u64, claim_value: Money) -> Result<Money, PolicyError> {
        let result = self.policy.fnol(caller, internal_id, claim_value);
        self.settle(Operation::FileClaim, caller, result)
    }

    pub fn set_claim_documentation_work_flow(
        &mut self,
        caller: &PartyId,
        internal_id: u64,
        checklist: DocumentationChecklist,
    ) -> Result<(), PolicyError> {
        let result = self
            .policy
            .set_claim_documentation_work_flow(caller, internal_id, checklist);
        self.settle(Operation::UpdateClaimDocumentation, caller, result)
    }

    pub fn finalize_policy(&mut self, caller: &PartyId) -> Result<(), PolicyError> {
        let result = self.policy.finalize_policy(caller);
        self.settle(Operation::FinalizePolicy, caller, result)
    }

    /// Publishes on success, logs on rejection
    fn settle<R>(&mut self, operation: Operation, caller: &PartyId, result: Result<R, PolicyError>) -> Result<R, PolicyError> {
        match result {
            Ok(value) => {
                self.flush_events();
                Ok(value)
            }
            Err(err) => {
                warn!(
                    policy_id = %self.policy.id(),
                    operation = %operation,
                    caller = %caller,
                    error = %err,
                    "Operation rejected"
                );
                Err(err)
            }
        }
    }
}
