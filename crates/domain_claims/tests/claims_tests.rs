//! Comprehensive tests for domain_claims

use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};

use domain_claims::claim::{Claim, ClaimView};
use domain_claims::error::ClaimError;
use domain_claims::registry::ClaimsRegistry;
use domain_claims::workflow::{ClaimDocument, DocumentationChecklist};

fn usd(minor: u64) -> Money {
    Money::from_minor(minor, Currency::USD)
}

// ============================================================================
// Claim Tests
// ============================================================================

mod claim_tests {
    use super::*;

    #[test]
    fn test_claim_fnol() {
        let claim = Claim::fnol(7, usd(114), usd(114));

        assert_eq!(claim.internal_id, 7);
        assert_eq!(claim.filings, 1);
        assert_eq!(claim.requested_total.amount(), dec!(114));
        assert_eq!(claim.checklist, DocumentationChecklist::default());
        assert_eq!(claim.filed_at, claim.updated_at);
    }

    #[test]
    fn test_refile_accumulates() {
        let mut claim = Claim::fnol(7, usd(114), usd(114));
        claim.refile(usd(50), usd(20)).unwrap();

        assert_eq!(claim.filings, 2);
        assert_eq!(claim.requested_total.amount(), dec!(164));
        assert_eq!(claim.settled_total.amount(), dec!(134));
        assert!(claim.updated_at >= claim.filed_at);
    }

    #[test]
    fn test_refile_in_other_currency_fails() {
        let mut claim = Claim::fnol(7, usd(114), usd(114));
        let result = claim.refile(Money::from_minor(1, Currency::EUR), usd(0));

        assert!(matches!(result, Err(ClaimError::Calculation(_))));
        assert_eq!(claim.filings, 1);
    }

    #[test]
    fn test_view_carries_flags() {
        let mut claim = Claim::fnol(3, usd(10), usd(10));
        claim.set_documentation(DocumentationChecklist::new(true, false, false, true, false));

        let view = claim.view();
        assert_eq!(view.internal_id, 3);
        assert!(view.checklist.id_received);
        assert!(view.checklist.imei_block);
        assert!(!view.checklist.video_received);
        assert!(!view.is_unfiled());
    }

    #[test]
    fn test_view_serializes_flat() {
        let view = Claim::fnol(3, usd(10), usd(10)).view();
        let json = serde_json::to_value(view).unwrap();

        assert_eq!(json["internal_id"], 3);
        assert_eq!(json["police_notice_report"], false);
        assert_eq!(json["filings"], 1);
    }
}

// ============================================================================
// Workflow Tests
// ============================================================================

mod workflow_tests {
    use super::*;

    #[test]
    fn test_has_each_document() {
        let checklist = DocumentationChecklist::complete();
        for document in ClaimDocument::ALL {
            assert!(checklist.has(document), "{} should be received", document);
        }
    }

    #[test]
    fn test_received_count() {
        let checklist = DocumentationChecklist::new(true, true, false, false, true);
        assert_eq!(checklist.received_count(), 3);
        assert!(!checklist.is_complete());
    }

    #[test]
    fn test_document_names() {
        assert_eq!(ClaimDocument::DeductablePaid.to_string(), "deductable_paid");
        assert_eq!(
            serde_json::to_string(&ClaimDocument::PoliceNoticeReport).unwrap(),
            "\"police_notice_report\""
        );
    }
}

// ============================================================================
// Registry Tests
// ============================================================================

mod registry_tests {
    use super::*;

    #[test]
    fn test_three_claims_in_id_order() {
        let mut registry = ClaimsRegistry::new(Currency::USD);
        registry.file(3, usd(114), usd(114)).unwrap();
        registry.file(1, usd(114), usd(114)).unwrap();
        registry.file(2, usd(114), usd(114)).unwrap();

        let ids: Vec<u64> = registry.iter().map(|c| c.internal_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.total_settled().unwrap().amount(), dec!(342));
    }

    #[test]
    fn test_validate_filing() {
        let registry = ClaimsRegistry::new(Currency::USD);

        assert!(registry.validate_filing(1, &usd(1)).is_ok());
        assert!(matches!(
            registry.validate_filing(0, &usd(1)),
            Err(ClaimError::InvalidClaimId(0))
        ));
        assert!(matches!(
            registry.validate_filing(1, &usd(0)),
            Err(ClaimError::InvalidClaimValue(_))
        ));
        assert!(matches!(
            registry.validate_filing(1, &Money::from_minor(5, Currency::BRL)),
            Err(ClaimError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_documentation_fully_replaces_flags() {
        let mut registry = ClaimsRegistry::new(Currency::USD);
        registry.file(1, usd(100), usd(100)).unwrap();

        registry
            .set_documentation(1, DocumentationChecklist::new(true, true, true, true, true))
            .unwrap();
        registry
            .set_documentation(1, DocumentationChecklist::new(false, true, false, false, false))
            .unwrap();

        let view = registry.view(1);
        assert_eq!(
            view.checklist,
            DocumentationChecklist::new(false, true, false, false, false)
        );
    }

    #[test]
    fn test_documentation_for_unknown_claim_fails() {
        let mut registry = ClaimsRegistry::new(Currency::USD);

        let unknown = registry.set_documentation(9, DocumentationChecklist::complete());
        assert!(matches!(unknown, Err(ClaimError::ClaimNotFound(9))));

        let zero = registry.set_documentation(0, DocumentationChecklist::complete());
        assert!(matches!(zero, Err(ClaimError::InvalidClaimId(0))));
    }

    #[test]
    fn test_unknown_id_returns_default_view() {
        let mut registry = ClaimsRegistry::new(Currency::USD);
        registry.file(1, usd(100), usd(100)).unwrap();

        assert_eq!(registry.view(2), ClaimView::default());
        assert!(!registry.contains(2));
        assert!(registry.get(2).is_none());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn refiling_counts_every_call(values in proptest::collection::vec(1u64..10_000u64, 1..20)) {
            let mut registry = ClaimsRegistry::new(Currency::USD);
            for value in &values {
                registry.file(1, usd(*value), usd(*value)).unwrap();
            }

            let claim = registry.get(1).unwrap();
            prop_assert_eq!(claim.filings as usize, values.len());
            prop_assert_eq!(
                claim.requested_total.amount(),
                rust_decimal::Decimal::from(values.iter().sum::<u64>())
            );
        }
    }
}
