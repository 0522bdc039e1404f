//! Cross-crate policy scenarios
//!
//! Drives the reference policy end to end with the shared fixtures, the
//! recording transfer fake and the snapshot assertions.

use core_kernel::{Currency, Money, Percent};
use domain_policy::ErrorKind;
use test_utils::*;

fn usd(minor: u64) -> Money {
    Money::from_minor(minor, Currency::USD)
}

mod balance {
    use super::*;

    #[test]
    fn test_three_claims_exhaust_reference_balance() {
        let parties = PartyFixtures::new();
        let mut policy = TestPolicyBuilder::new().with_parties(parties).build();

        for id in 1..=3 {
            let deducted = policy.fnol(&parties.customer, id, MoneyFixtures::claim_value()).unwrap();
            assert_money_eq(&deducted, 114);
        }
        assert_money_zero(&policy.policy_balance());

        let before = PolicyState::capture(&policy);
        let result = policy.fnol(&parties.customer, 4, usd(1));

        assert_error_kind(&result, ErrorKind::InsufficientBalance);
        assert_unchanged(&before, &policy);
    }

    #[test]
    fn test_oversized_claim_is_capped() {
        let parties = PartyFixtures::new();
        let mut policy = TestPolicyBuilder::new().with_parties(parties).build();

        let deducted = policy.fnol(&parties.customer, 1, usd(400)).unwrap();

        assert_money_eq(&deducted, 342);
        assert_money_zero(&policy.policy_balance());
    }
}

mod payouts {
    use super::*;

    #[test]
    fn test_refused_transfer_leaves_flags_and_funds() {
        let parties = PartyFixtures::new();
        let mut policy = TestPolicyBuilder::new().with_parties(parties).build();
        let mut transfer = RecordingTransfer::failing();

        policy
            .split_commissions_with_external_money(&parties.admin, usd(10000))
            .unwrap();
        let before = PolicyState::capture(&policy);

        let result = policy.send_commission_splited_agent(&parties.customer, &mut transfer);

        assert_error_kind(&result, ErrorKind::TransferFailed);
        assert_unchanged(&before, &policy);
        assert_eq!(transfer.call_count(), 1);
        assert!(transfer.receipts().is_empty());
    }

    #[test]
    fn test_retry_after_recovery_pays_once() {
        let parties = PartyFixtures::new();
        let mut policy = TestPolicyBuilder::new().with_parties(parties).build();
        let mut transfer = RecordingTransfer::failing();

        policy
            .split_commissions_with_external_money(&parties.admin, usd(10000))
            .unwrap();
        assert!(policy.send_commission_splited_broker(&parties.admin, &mut transfer).is_err());

        transfer.set_failing(false);
        let receipt = policy
            .send_commission_splited_broker(&parties.admin, &mut transfer)
            .unwrap();

        assert_eq!(receipt.payee, parties.broker);
        assert_money_eq(&receipt.amount, 100);
        assert_money_eq(&policy.held_funds(), 9900);
        assert_eq!(transfer.calls().len(), 2);
        assert_eq!(transfer.receipts().len(), 1);
        assert!(policy.is_broker_paid());
    }

    #[test]
    fn test_shared_fake_sees_transfers_made_through_clone() {
        let parties = PartyFixtures::new();
        let mut policy = TestPolicyBuilder::new().with_parties(parties).build();
        let observer = RecordingTransfer::new();
        let mut port = observer.clone();

        policy
            .split_commissions_with_external_money(&parties.admin, MoneyFixtures::external_payment())
            .unwrap();
        policy.send_commission_splited_agent(&parties.agent, &mut port).unwrap();

        assert_eq!(observer.calls(), vec![(parties.agent, usd(10000000))]);
    }
}

mod events {
    use super::*;

    #[test]
    fn test_full_lifecycle_event_sequence() {
        let parties = PartyFixtures::new();
        let mut policy = TestPolicyBuilder::new()
            .with_parties(parties)
            .with_insured_name(fake_insured_name())
            .build();
        let mut transfer = RecordingTransfer::new();

        policy
            .set_fee_commissions_percent(&parties.admin, PercentFixtures::broker(), PercentFixtures::agent())
            .unwrap();
        policy.change_donation_value(&parties.admin, Percent::new(4)).unwrap();
        policy
            .split_commissions_with_external_money(&parties.admin, MoneyFixtures::external_payment())
            .unwrap();
        policy.send_commission_splited_agent(&parties.admin, &mut transfer).unwrap();
        policy.fnol(&parties.customer, 1, MoneyFixtures::claim_value()).unwrap();
        policy
            .set_claim_documentation_work_flow(&parties.broker, 1, domain_claims::DocumentationChecklist::complete())
            .unwrap();
        policy.finalize_policy(&parties.admin).unwrap();

        assert_event_types(
            &policy.take_events(),
            &[
                "PolicyIssued",
                "CommissionPercentsChanged",
                "DonationPercentChanged",
                "CommissionSplit",
                "CommissionPaid",
                "ClaimFiled",
                "ClaimDocumentationUpdated",
                "StatusChanged",
            ],
        );
        assert_eq!(policy.version(), 8);
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn out_of_range_fees_change_nothing(bad in invalid_fee_percent_strategy(), good in valid_fee_percent_strategy()) {
            let parties = PartyFixtures::new();
            let mut policy = TestPolicyBuilder::new().with_parties(parties).build();
            let before = PolicyState::capture(&policy);

            let result = policy.set_fee_commissions_percent(&parties.admin, good, bad);

            prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
            prop_assert_eq!(before, PolicyState::capture(&policy));
        }

        #[test]
        fn documentation_update_replaces_flags(
            id in claim_id_strategy(),
            first in checklist_strategy(),
            second in checklist_strategy(),
        ) {
            let parties = PartyFixtures::new();
            let mut policy = TestPolicyBuilder::new().with_parties(parties).build();
            policy.fnol(&parties.customer, id, usd(1)).unwrap();

            policy.set_claim_documentation_work_flow(&parties.agent, id, first).unwrap();
            policy.set_claim_documentation_work_flow(&parties.agent, id, second).unwrap();

            prop_assert_eq!(policy.claim(id).checklist, second);
            prop_assert_eq!(policy.claim_settlement_ready(id), second.is_complete());
        }

        #[test]
        fn split_fees_never_exceed_payment(amount in usd_money_strategy(), agent in valid_fee_percent_strategy(), broker in valid_fee_percent_strategy()) {
            let parties = PartyFixtures::new();
            let mut policy = TestPolicyBuilder::new().with_parties(parties).build();
            policy.set_fee_commissions_percent(&parties.admin, broker, agent).unwrap();

            let split = policy.split_commissions_with_external_money(&parties.admin, amount).unwrap();

            prop_assert!(split.agent_fee.amount() <= amount.amount());
            prop_assert!(split.broker_fee.amount() <= amount.amount());
            prop_assert_eq!(split.fee.amount(), split.agent_fee.amount() + split.broker_fee.amount());
        }
    }
}
