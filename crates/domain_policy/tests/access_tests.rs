//! Access Control Tests
//!
//! Covers role resolution and the admin/any split of every operation.

use core_kernel::PartyId;
use domain_policy::{authorize, Access, ErrorKind, Operation, PolicyParties, Role};

fn parties() -> PolicyParties {
    PolicyParties {
        customer: PartyId::new(),
        agent: PartyId::new(),
        broker: PartyId::new(),
        admin: PartyId::new(),
    }
}

const ADMIN_ONLY: [Operation; 4] = [
    Operation::SetFeeCommissions,
    Operation::ChangeDonation,
    Operation::SplitCommissions,
    Operation::FinalizePolicy,
];

const OPEN: [Operation; 4] = [
    Operation::FileClaim,
    Operation::UpdateClaimDocumentation,
    Operation::PayAgentCommission,
    Operation::PayBrokerCommission,
];

#[test]
fn test_operation_access_levels() {
    for operation in ADMIN_ONLY {
        assert_eq!(operation.access(), Access::Admin, "{}", operation);
    }
    for operation in OPEN {
        assert_eq!(operation.access(), Access::Any, "{}", operation);
    }
}

#[test]
fn test_each_party_resolves_to_its_role() {
    let parties = parties();

    assert_eq!(parties.role_of(&parties.customer), Some(Role::Customer));
    assert_eq!(parties.role_of(&parties.agent), Some(Role::Agent));
    assert_eq!(parties.role_of(&parties.broker), Some(Role::Broker));
    assert_eq!(parties.role_of(&parties.admin), Some(Role::Admin));
}

#[test]
fn test_shared_identity_takes_highest_role() {
    let mut parties = parties();
    parties.broker = parties.agent;
    parties.customer = parties.agent;

    assert_eq!(parties.role_of(&parties.agent), Some(Role::Agent));
}

#[test]
fn test_admin_only_operations() {
    let parties = parties();
    let outsider = PartyId::new();

    for operation in ADMIN_ONLY {
        assert!(authorize(operation, &parties.admin, &parties).is_ok());
        for caller in [parties.customer, parties.agent, parties.broker, outsider] {
            let err = authorize(operation, &caller, &parties).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Authorization);
        }
    }
}

#[test]
fn test_open_operations_report_role() {
    let parties = parties();

    for operation in OPEN {
        assert_eq!(
            authorize(operation, &parties.broker, &parties).unwrap(),
            Some(Role::Broker)
        );
        assert_eq!(authorize(operation, &PartyId::new(), &parties).unwrap(), None);
    }
}

#[test]
fn test_operation_names() {
    assert_eq!(Operation::FileClaim.to_string(), "fnol");
    assert_eq!(Operation::FinalizePolicy.name(), "finalize_policy");
    assert_eq!(Role::Admin.to_string(), "admin");
}
