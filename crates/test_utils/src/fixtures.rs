//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the policy suites. The reference
//! policy insures "Alex Silva", 88, for a Samsung Galaxy S7 with a coverage
//! of 2280, a starting balance of 342 and a deductible of 70.

use core_kernel::{Currency, Money, PartyId, Percent};
use domain_policy::PolicyParties;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Coverage value of the reference policy
    pub fn coverage() -> Money {
        Money::from_minor(2280, Currency::USD)
    }

    /// Starting balance of the reference policy
    pub fn initial_balance() -> Money {
        Money::from_minor(342, Currency::USD)
    }

    pub fn deductible() -> Money {
        Money::from_minor(70, Currency::USD)
    }

    /// One third of the reference balance
    pub fn claim_value() -> Money {
        Money::from_minor(114, Currency::USD)
    }

    /// External payment used by the split scenarios
    pub fn external_payment() -> Money {
        Money::from_minor(1000000000, Currency::USD)
    }

    /// Creates a zero amount
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// Creates a EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::from_minor(100, Currency::EUR)
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    pub fn insured_name() -> &'static str {
        "Alex Silva"
    }

    pub fn device_model() -> &'static str {
        "Samsung Galaxy S7"
    }

    pub fn insured_age() -> u8 {
        88
    }
}

/// Fixture for commission percentages
pub struct PercentFixtures;

impl PercentFixtures {
    /// Broker share used by the split scenarios
    pub fn broker() -> Percent {
        Percent::new(8)
    }

    /// Agent share used by the split scenarios
    pub fn agent() -> Percent {
        Percent::new(7)
    }
}

/// The four distinguished identities of a policy plus an outsider
#[derive(Debug, Clone, Copy)]
pub struct PartyFixtures {
    pub customer: PartyId,
    pub agent: PartyId,
    pub broker: PartyId,
    pub admin: PartyId,
    /// Holds no role on the policy
    pub outsider: PartyId,
}

impl PartyFixtures {
    /// Fresh, distinct identities
    pub fn new() -> Self {
        Self {
            customer: PartyId::new(),
            agent: PartyId::new(),
            broker: PartyId::new(),
            admin: PartyId::new(),
            outsider: PartyId::new(),
        }
    }

    pub fn parties(&self) -> PolicyParties {
        PolicyParties {
            customer: self.customer,
            agent: self.agent,
            broker: self.broker,
            admin: self.admin,
        }
    }
}

impl Default for PartyFixtures {
    fn default() -> Self {
        Self::new()
    }
}
