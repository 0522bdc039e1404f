//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_policy::{ErrorKind, Policy, PolicyError, PolicyEvent};

/// Asserts that a Money value has exactly `minor` minor units
pub fn assert_money_eq(actual: &Money, minor: u64) {
    assert_eq!(
        actual.amount(),
        rust_decimal::Decimal::from(minor),
        "Expected {} minor units, got {} {}",
        minor,
        actual.currency(),
        actual.amount()
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that a result failed with the given error kind
pub fn assert_error_kind<T: std::fmt::Debug>(result: &Result<T, PolicyError>, expected: ErrorKind) {
    match result {
        Ok(value) => panic!("Expected {:?} error, got Ok({:?})", expected, value),
        Err(err) => assert_eq!(
            err.kind(),
            expected,
            "Expected {:?} error, got {:?}: {}",
            expected,
            err.kind(),
            err
        ),
    }
}

/// Snapshot of every observable commission and balance value
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyState {
    pub status: u8,
    pub balance: Money,
    pub agent_fee_percent: u32,
    pub broker_fee_percent: u32,
    pub donation_percent: u32,
    pub fee_value: Money,
    pub held_funds: Money,
    pub agent_paid: bool,
    pub broker_paid: bool,
    pub version: u32,
}

impl PolicyState {
    pub fn capture(policy: &Policy) -> Self {
        Self {
            status: policy.status_code(),
            balance: policy.policy_balance(),
            agent_fee_percent: policy.agent_fee_percent().value(),
            broker_fee_percent: policy.broker_fee_percent().value(),
            donation_percent: policy.donation_percent().value(),
            fee_value: policy.fee_value(),
            held_funds: policy.held_funds(),
            agent_paid: policy.is_agent_paid(),
            broker_paid: policy.is_broker_paid(),
            version: policy.version(),
        }
    }
}

/// Asserts that a rejected call left the policy untouched
pub fn assert_unchanged(before: &PolicyState, policy: &Policy) {
    assert_eq!(before, &PolicyState::capture(policy), "Policy state changed after rejection");
}

/// Asserts the type names of a sequence of events
pub fn assert_event_types(events: &[PolicyEvent], expected: &[&str]) {
    let actual: Vec<&str> = events.iter().map(PolicyEvent::event_type).collect();
    assert_eq!(actual, expected, "Unexpected event sequence");
}
