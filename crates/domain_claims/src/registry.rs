//! Claims registry
//!
//! Ordered map of claims by internal id. Entries are never removed; the
//! registry only knows about claim bookkeeping, the policy decides how much
//! of each claim its balance can settle.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{Currency, Money};
use crate::claim::{Claim, ClaimView};
use crate::error::ClaimError;
use crate::workflow::DocumentationChecklist;

/// All claims filed against one policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimsRegistry {
    currency: Currency,
    claims: BTreeMap<u64, Claim>,
}

impl ClaimsRegistry {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            claims: BTreeMap::new(),
        }
    }

    /// Checks the id and value of a notice of loss
    ///
    /// # Errors
    ///
    /// - `InvalidClaimId` for id zero
    /// - `CurrencyMismatch` for a value in another currency
    /// - `InvalidClaimValue` for a zero value
    pub fn validate_filing(&self, internal_id: u64, claim_value: &Money) -> Result<(), ClaimError> {
        if internal_id == 0 {
            return Err(ClaimError::InvalidClaimId(internal_id));
        }
        if claim_value.currency() != self.currency {
            return Err(ClaimError::CurrencyMismatch {
                expected: self.currency.to_string(),
                actual: claim_value.currency().to_string(),
            });
        }
        if !claim_value.is_positive() {
            return Err(ClaimError::InvalidClaimValue(
                "claim value must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Registers a claim or re-touches an existing one
    ///
    /// `settled` is the part of `requested` deducted from the policy.
    pub fn file(&mut self, internal_id: u64, requested: Money, settled: Money) -> Result<&Claim, ClaimError> {
        self.validate_filing(internal_id, &requested)?;
        requested.ensure_same_currency(&settled)?;

        let claim = match self.claims.entry(internal_id) {
            std::collections::btree_map::Entry::Occupied(entry) => {
                let claim = entry.into_mut();
                claim.refile(requested, settled)?;
                claim
            }
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(Claim::fnol(internal_id, requested, settled))
            }
        };

        debug!(internal_id, filings = claim.filings, "Claim registered");
        Ok(claim)
    }

    /// Replaces the documentation checklist of a filed claim
    pub fn set_documentation(
        &mut self,
        internal_id: u64,
        checklist: DocumentationChecklist,
    ) -> Result<&Claim, ClaimError> {
        if internal_id == 0 {
            return Err(ClaimError::InvalidClaimId(internal_id));
        }
        let claim = self
            .claims
            .get_mut(&internal_id)
            .ok_or(ClaimError::ClaimNotFound(internal_id))?;

        claim.set_documentation(checklist);
        Ok(claim)
    }

    pub fn get(&self, internal_id: u64) -> Option<&Claim> {
        self.claims.get(&internal_id)
    }

    /// Returns the claim view, or the default view for an unknown id
    pub fn view(&self, internal_id: u64) -> ClaimView {
        self.get(internal_id).map(Claim::view).unwrap_or_default()
    }

    pub fn contains(&self, internal_id: u64) -> bool {
        self.claims.contains_key(&internal_id)
    }

    /// Claims in id order
    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.claims.values()
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Sum deducted from the policy across every claim
    pub fn total_settled(&self) -> Result<Money, ClaimError> {
        let mut total = Money::zero(self.currency);
        for claim in self.claims.values() {
            total = total.checked_add(&claim.settled_total)?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(minor: u64) -> Money {
        Money::from_minor(minor, Currency::USD)
    }

    #[test]
    fn test_file_and_refile() {
        let mut registry = ClaimsRegistry::new(Currency::USD);
        registry.file(1, usd(114), usd(114)).unwrap();
        registry.set_documentation(1, DocumentationChecklist::complete()).unwrap();
        registry.file(1, usd(400), usd(228)).unwrap();

        let claim = registry.get(1).unwrap();
        assert_eq!(claim.filings, 2);
        assert_eq!(claim.requested_total, usd(514));
        assert_eq!(claim.settled_total, usd(342));
        assert!(claim.checklist.is_complete());
    }

    #[test]
    fn test_zero_id_rejected() {
        let mut registry = ClaimsRegistry::new(Currency::USD);
        let result = registry.file(0, usd(10), usd(10));
        assert!(matches!(result, Err(ClaimError::InvalidClaimId(0))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_id_reads_default_view() {
        let registry = ClaimsRegistry::new(Currency::USD);
        let view = registry.view(42);
        assert!(view.is_unfiled());
        assert_eq!(view, ClaimView::default());
    }
}
