//! Domain Event Tests
//!
//! Checks the event recorded by each mutation and the helper accessors.

use rust_decimal_macros::dec;

use core_kernel::{Currency, FundsTransfer, Money, PartyId, Percent, PortError, TransferReceipt};
use domain_billing::Payee;
use domain_claims::DocumentationChecklist;
use domain_policy::{Policy, PolicyBuilder, PolicyEvent, PolicyStatus};

fn usd(minor: u64) -> Money {
    Money::from_minor(minor, Currency::USD)
}

struct Settles;

impl FundsTransfer for Settles {
    fn transfer(&mut self, payee: PartyId, amount: Money) -> Result<TransferReceipt, PortError> {
        Ok(TransferReceipt::settled_now(payee, amount))
    }
}

fn create_policy(admin: PartyId, customer: PartyId) -> Policy {
    PolicyBuilder::new()
        .customer(customer)
        .insured_name("Alex Silva")
        .insured_age(88)
        .coverage_value(usd(2280))
        .initial_balance(usd(342))
        .deductible(usd(70))
        .device_model("Samsung Galaxy S7")
        .agent(PartyId::new())
        .broker(PartyId::new())
        .admin(admin)
        .build()
        .unwrap()
}

#[test]
fn test_event_sequence_for_full_lifecycle() {
    let admin = PartyId::new();
    let customer = PartyId::new();
    let mut policy = create_policy(admin, customer);

    policy.set_fee_commissions_percent(&admin, Percent::new(8), Percent::new(7)).unwrap();
    policy.change_donation_value(&admin, Percent::new(3)).unwrap();
    policy.split_commissions_with_external_money(&admin, usd(10000)).unwrap();
    policy.send_commission_splited_agent(&admin, &mut Settles).unwrap();
    policy.fnol(&customer, 1, usd(114)).unwrap();
    policy
        .set_claim_documentation_work_flow(&customer, 1, DocumentationChecklist::complete())
        .unwrap();
    policy.finalize_policy(&admin).unwrap();

    let events = policy.take_events();
    let types: Vec<&str> = events.iter().map(|e| e.event_type()).collect();
    assert_eq!(
        types,
        vec![
            "PolicyIssued",
            "CommissionPercentsChanged",
            "DonationPercentChanged",
            "CommissionSplit",
            "CommissionPaid",
            "ClaimFiled",
            "ClaimDocumentationUpdated",
            "StatusChanged",
        ]
    );
    assert!(events.iter().all(|e| e.policy_id() == policy.id()));
    assert!(events.windows(2).all(|w| w[0].timestamp() <= w[1].timestamp()));
    assert_eq!(policy.version(), 8);
}

#[test]
fn test_claim_filed_payload() {
    let admin = PartyId::new();
    let customer = PartyId::new();
    let mut policy = create_policy(admin, customer);
    policy.take_events();

    policy.fnol(&customer, 9, usd(400)).unwrap();

    match policy.take_events().as_slice() {
        [PolicyEvent::ClaimFiled { internal_id, requested, deducted, remaining, .. }] => {
            assert_eq!(*internal_id, 9);
            assert_eq!(requested.amount(), dec!(400));
            assert_eq!(deducted.amount(), dec!(342));
            assert!(remaining.is_zero());
        }
        other => panic!("unexpected events {:?}", other),
    }
}

#[test]
fn test_commission_paid_payload() {
    let admin = PartyId::new();
    let mut policy = create_policy(admin, PartyId::new());
    policy.split_commissions_with_external_money(&admin, usd(10000)).unwrap();
    policy.take_events();

    let receipt = policy.send_commission_splited_broker(&admin, &mut Settles).unwrap();

    match policy.take_events().as_slice() {
        [PolicyEvent::CommissionPaid { payee, account, amount, transfer_id, .. }] => {
            assert_eq!(*payee, Payee::Broker);
            assert_eq!(*account, policy.broker());
            assert_eq!(amount.amount(), dec!(100));
            assert_eq!(*transfer_id, receipt.transfer_id);
        }
        other => panic!("unexpected events {:?}", other),
    }
}

#[test]
fn test_rejections_record_nothing() {
    let admin = PartyId::new();
    let customer = PartyId::new();
    let mut policy = create_policy(admin, customer);
    policy.take_events();

    let _ = policy.finalize_policy(&customer);
    let _ = policy.fnol(&customer, 0, usd(10));
    let _ = policy.send_commission_splited_agent(&admin, &mut Settles);

    assert!(policy.take_events().is_empty());
    assert_eq!(policy.version(), 1);
}

#[test]
fn test_event_serialization() {
    let admin = PartyId::new();
    let mut policy = create_policy(admin, PartyId::new());
    policy.finalize_policy(&admin).unwrap();

    let event = policy.take_events().pop().unwrap();
    let json = serde_json::to_value(&event).unwrap();

    assert_eq!(json["StatusChanged"]["status"], "Finalized");
    let back: PolicyEvent = serde_json::from_value(json).unwrap();
    assert_eq!(back, event);
    assert!(matches!(back, PolicyEvent::StatusChanged { status: PolicyStatus::Finalized, .. }));
}
