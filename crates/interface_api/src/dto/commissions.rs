//! Commission DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{PartyId, TransferId, TransferReceipt};
use domain_billing::FeeSplit;

/// Percent bounds are enforced by the policy, after the access gate
#[derive(Debug, Deserialize)]
pub struct SetCommissionsRequest {
    pub broker_percent: u32,
    pub agent_percent: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChangeDonationRequest {
    pub donation_percent: u32,
}

/// External payment to split, in minor units
#[derive(Debug, Deserialize)]
pub struct SplitRequest {
    pub amount: u64,
}

#[derive(Debug, Serialize)]
pub struct SplitResponse {
    pub amount: Decimal,
    pub agent_fee: Decimal,
    pub broker_fee: Decimal,
    pub fee: Decimal,
    pub donation: Decimal,
}

impl From<FeeSplit> for SplitResponse {
    fn from(split: FeeSplit) -> Self {
        Self {
            amount: split.amount.amount(),
            agent_fee: split.agent_fee.amount(),
            broker_fee: split.broker_fee.amount(),
            fee: split.fee.amount(),
            donation: split.donation.amount(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PayoutResponse {
    pub transfer_id: TransferId,
    pub payee: PartyId,
    pub amount: Decimal,
    pub currency: String,
    pub settled_at: DateTime<Utc>,
}

impl From<TransferReceipt> for PayoutResponse {
    fn from(receipt: TransferReceipt) -> Self {
        Self {
            transfer_id: receipt.transfer_id,
            payee: receipt.payee,
            amount: receipt.amount.amount(),
            currency: receipt.amount.currency().code().to_string(),
            settled_at: receipt.settled_at,
        }
    }
}
