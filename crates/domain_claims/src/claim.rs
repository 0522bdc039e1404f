//! Claim entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::Money;
use crate::error::ClaimError;
use crate::workflow::DocumentationChecklist;

/// A claim filed against the policy, keyed by the caller's internal id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Caller-assigned identifier, never zero
    pub internal_id: u64,
    /// Documentation received so far
    pub checklist: DocumentationChecklist,
    /// Sum of the claim values asked for
    pub requested_total: Money,
    /// Sum actually deducted from the policy balance
    pub settled_total: Money,
    /// Number of FNOL calls against this id
    pub filings: u32,
    /// First notice of loss
    pub filed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Creates a claim from its first notice of loss
    pub fn fnol(internal_id: u64, requested: Money, settled: Money) -> Self {
        let now = Utc::now();
        Self {
            internal_id,
            checklist: DocumentationChecklist::default(),
            requested_total: requested,
            settled_total: settled,
            filings: 1,
            filed_at: now,
            updated_at: now,
        }
    }

    /// Records another notice of loss against the same id
    ///
    /// Totals accumulate; documentation flags are left as they are.
    pub fn refile(&mut self, requested: Money, settled: Money) -> Result<(), ClaimError> {
        let requested_total = self.requested_total.checked_add(&requested)?;
        let settled_total = self.settled_total.checked_add(&settled)?;

        self.requested_total = requested_total;
        self.settled_total = settled_total;
        self.filings += 1;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Replaces the whole documentation checklist
    pub fn set_documentation(&mut self, checklist: DocumentationChecklist) {
        self.checklist = checklist;
        self.updated_at = Utc::now();
    }

    /// Returns the read-only view of this claim
    pub fn view(&self) -> ClaimView {
        ClaimView {
            internal_id: self.internal_id,
            checklist: self.checklist,
            filings: self.filings,
        }
    }
}

/// Read-only claim tuple: id plus documentation flags
///
/// Unknown ids read as the default view (`internal_id == 0`, every flag
/// false).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimView {
    pub internal_id: u64,
    #[serde(flatten)]
    pub checklist: DocumentationChecklist,
    pub filings: u32,
}

impl ClaimView {
    /// Returns true for the view of an id that was never filed
    pub fn is_unfiled(&self) -> bool {
        self.internal_id == 0
    }
}
