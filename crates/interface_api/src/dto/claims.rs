//! Claims DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_claims::{ClaimView, DocumentationChecklist};
use domain_policy::Policy;

/// First notice of loss, `claim_value` in minor units
#[derive(Debug, Deserialize)]
pub struct FnolRequest {
    pub internal_id: u64,
    pub claim_value: u64,
}

#[derive(Debug, Serialize)]
pub struct FnolResponse {
    pub internal_id: u64,
    pub deducted: Decimal,
    pub policy_balance: Decimal,
}

/// Full replacement of a claim's documentation flags
#[derive(Debug, Deserialize)]
pub struct DocumentationRequest {
    pub id_received: bool,
    pub video_received: bool,
    pub deductable_paid: bool,
    pub imei_block: bool,
    pub police_notice_report: bool,
}

impl From<DocumentationRequest> for DocumentationChecklist {
    fn from(request: DocumentationRequest) -> Self {
        DocumentationChecklist {
            id_received: request.id_received,
            video_received: request.video_received,
            deductable_paid: request.deductable_paid,
            imei_block: request.imei_block,
            police_notice_report: request.police_notice_report,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    #[serde(flatten)]
    pub claim: ClaimView,
    pub settlement_ready: bool,
    /// Policy deductible, settled by the `deductable_paid` document
    pub deductible: Decimal,
}

impl ClaimResponse {
    pub fn new(policy: &Policy, internal_id: u64) -> Self {
        Self {
            claim: policy.claim(internal_id),
            settlement_ready: policy.claim_settlement_ready(internal_id),
            deductible: policy.deductible().amount(),
        }
    }
}
