//! Policy DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{PartyId, PolicyId};
use domain_policy::Policy;

/// Snapshot of the served policy
///
/// Amounts are in minor units of `currency`.
#[derive(Debug, Serialize)]
pub struct PolicySummaryResponse {
    pub id: PolicyId,
    pub policy_number: String,
    pub status: String,
    pub status_code: u8,
    pub customer: PartyId,
    pub agent: PartyId,
    pub broker: PartyId,
    pub admin: PartyId,
    pub insured_name: String,
    pub insured_age: u8,
    pub device_model: String,
    pub currency: String,
    pub coverage_value: Decimal,
    pub policy_balance: Decimal,
    pub deductible: Decimal,
    pub agent_fee_percent: u32,
    pub broker_fee_percent: u32,
    pub fee_percent: u32,
    pub donation_percent: u32,
    pub agent_fee_value: Decimal,
    pub broker_fee_value: Decimal,
    pub fee_value: Decimal,
    pub donation_value: Decimal,
    pub held_funds: Decimal,
    pub agent_paid: bool,
    pub broker_paid: bool,
    pub claims_filed: usize,
    pub version: u32,
    pub updated_at: DateTime<Utc>,
}

impl From<&Policy> for PolicySummaryResponse {
    fn from(policy: &Policy) -> Self {
        Self {
            id: policy.id(),
            policy_number: policy.policy_number().to_string(),
            status: policy.status().to_string(),
            status_code: policy.status_code(),
            customer: policy.customer(),
            agent: policy.agent(),
            broker: policy.broker(),
            admin: policy.admin(),
            insured_name: policy.insured_name().to_string(),
            insured_age: policy.insured_age(),
            device_model: policy.device_model().to_string(),
            currency: policy.currency().code().to_string(),
            coverage_value: policy.coverage_value().amount(),
            policy_balance: policy.policy_balance().amount(),
            deductible: policy.deductible().amount(),
            agent_fee_percent: policy.agent_fee_percent().value(),
            broker_fee_percent: policy.broker_fee_percent().value(),
            fee_percent: policy.fee_percent().value(),
            donation_percent: policy.donation_percent().value(),
            agent_fee_value: policy.agent_fee_value().amount(),
            broker_fee_value: policy.broker_fee_value().amount(),
            fee_value: policy.fee_value().amount(),
            donation_value: policy.donation_value().amount(),
            held_funds: policy.held_funds().amount(),
            agent_paid: policy.is_agent_paid(),
            broker_paid: policy.is_broker_paid(),
            claims_filed: policy.claims().len(),
            version: policy.version(),
            updated_at: policy.updated_at(),
        }
    }
}
