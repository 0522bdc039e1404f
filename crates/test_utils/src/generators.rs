//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants, plus `fake` based descriptive data.

use core_kernel::{Currency, Money, Percent};
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;

use domain_claims::DocumentationChecklist;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::BRL),
        Just(Currency::JPY),
    ]
}

/// Strategy for generating valid positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = u64> {
    1u64..1_000_000_000u64
}

/// Strategy for generating valid USD Money values
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy()
        .prop_map(|amount| Money::from_minor(amount, Currency::USD))
}

/// Fee percentages the setter accepts
pub fn valid_fee_percent_strategy() -> impl Strategy<Value = Percent> {
    (2u32..=100u32).prop_map(Percent::new)
}

/// Fee percentages the setter rejects
pub fn invalid_fee_percent_strategy() -> impl Strategy<Value = Percent> {
    prop_oneof![
        (0u32..2u32).prop_map(Percent::new),
        (101u32..10_000u32).prop_map(Percent::new),
    ]
}

/// Claim ids; zero is reserved
pub fn claim_id_strategy() -> impl Strategy<Value = u64> {
    1u64..1_000u64
}

pub fn checklist_strategy() -> impl Strategy<Value = DocumentationChecklist> {
    any::<[bool; 5]>().prop_map(|flags| {
        DocumentationChecklist::new(flags[0], flags[1], flags[2], flags[3], flags[4])
    })
}

/// A plausible insured name
pub fn fake_insured_name() -> String {
    Name().fake()
}
