//! Test Data Builders
//!
//! Provides builder patterns for constructing test policies with sensible
//! defaults. Tests override only the fields they care about.

use core_kernel::Money;
use domain_policy::{Policy, PolicyBuilder, PolicyError};

use crate::fixtures::{MoneyFixtures, PartyFixtures, StringFixtures};

/// Builder for the reference policy
pub struct TestPolicyBuilder {
    parties: PartyFixtures,
    insured_name: String,
    insured_age: u8,
    device_model: String,
    coverage_value: Money,
    initial_balance: Money,
    deductible: Money,
}

impl Default for TestPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPolicyBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            parties: PartyFixtures::new(),
            insured_name: StringFixtures::insured_name().to_string(),
            insured_age: StringFixtures::insured_age(),
            device_model: StringFixtures::device_model().to_string(),
            coverage_value: MoneyFixtures::coverage(),
            initial_balance: MoneyFixtures::initial_balance(),
            deductible: MoneyFixtures::deductible(),
        }
    }

    pub fn with_parties(mut self, parties: PartyFixtures) -> Self {
        self.parties = parties;
        self
    }

    pub fn with_insured_name(mut self, name: impl Into<String>) -> Self {
        self.insured_name = name.into();
        self
    }

    pub fn with_insured_age(mut self, age: u8) -> Self {
        self.insured_age = age;
        self
    }

    pub fn with_initial_balance(mut self, balance: Money) -> Self {
        self.initial_balance = balance;
        self
    }

    pub fn with_coverage_value(mut self, coverage: Money) -> Self {
        self.coverage_value = coverage;
        self
    }

    /// Parties the policy will be issued to
    pub fn parties(&self) -> PartyFixtures {
        self.parties
    }

    /// Issues the policy
    pub fn try_build(self) -> Result<Policy, PolicyError> {
        PolicyBuilder::new()
            .customer(self.parties.customer)
            .insured_name(self.insured_name)
            .insured_age(self.insured_age)
            .coverage_value(self.coverage_value)
            .initial_balance(self.initial_balance)
            .deductible(self.deductible)
            .device_model(self.device_model)
            .agent(self.parties.agent)
            .broker(self.parties.broker)
            .admin(self.parties.admin)
            .currency(self.coverage_value.currency())
            .build()
    }

    /// Issues the policy, panicking on invalid test data
    pub fn build(self) -> Policy {
        self.try_build().expect("test policy should be valid")
    }
}
