//! API configuration
//!
//! Both the server settings (`API_*`) and the terms of the policy the host
//! serves (`POLICY_*`) come from the environment; a `.env` file is loaded
//! first by the binary.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{Currency, Money, PartyId};
use domain_policy::{Policy, PolicyBuilder, PolicyError};

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment, falling back to defaults per key
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("jwt_expiration_secs", defaults.jwt_expiration_secs as i64)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Terms of the policy issued at startup
///
/// Amounts are whole minor units of `currency`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PolicyConfig {
    pub customer: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub insured_name: String,
    #[validate(range(min = 1, max = 150))]
    pub insured_age: u8,
    #[validate(range(min = 1))]
    pub coverage_value: u64,
    pub initial_balance: u64,
    pub deductible: u64,
    #[validate(length(min = 1, max = 200))]
    pub device_model: String,
    pub agent: Uuid,
    pub broker: Uuid,
    pub admin: Uuid,
    #[validate(length(equal = 3))]
    pub currency: String,
}

impl PolicyConfig {
    /// Loads the policy terms from `POLICY_*` variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("currency", "USD")?
            .add_source(config::Environment::with_prefix("POLICY").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Issues the configured policy
    ///
    /// Field-level checks run before the builder so a bad environment is
    /// reported with every offending key at once.
    pub fn issue(&self) -> Result<Policy, PolicyError> {
        self.validate()
            .map_err(|e| PolicyError::validation(format!("policy configuration: {}", e)))?;

        let currency: Currency = self.currency.parse()?;
        let money = |minor| Money::from_minor(minor, currency);

        PolicyBuilder::new()
            .customer(PartyId::from_uuid(self.customer))
            .insured_name(self.insured_name.clone())
            .insured_age(self.insured_age)
            .coverage_value(money(self.coverage_value))
            .initial_balance(money(self.initial_balance))
            .deductible(money(self.deductible))
            .device_model(self.device_model.clone())
            .agent(PartyId::from_uuid(self.agent))
            .broker(PartyId::from_uuid(self.broker))
            .admin(PartyId::from_uuid(self.admin))
            .currency(currency)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy_config() -> PolicyConfig {
        PolicyConfig {
            customer: Uuid::new_v4(),
            insured_name: "Alex Silva".to_string(),
            insured_age: 88,
            coverage_value: 2280,
            initial_balance: 342,
            deductible: 70,
            device_model: "Samsung Galaxy S7".to_string(),
            agent: Uuid::new_v4(),
            broker: Uuid::new_v4(),
            admin: Uuid::new_v4(),
            currency: "usd".to_string(),
        }
    }

    #[test]
    fn test_issue_configured_policy() {
        let config = policy_config();
        let policy = config.issue().unwrap();

        assert_eq!(policy.currency(), Currency::USD);
        assert_eq!(policy.policy_balance(), Money::from_minor(342, Currency::USD));
        assert_eq!(policy.admin(), PartyId::from_uuid(config.admin));
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let config = PolicyConfig {
            currency: "XYZ".to_string(),
            ..policy_config()
        };
        assert!(config.issue().is_err());
    }

    #[test]
    fn test_invalid_fields_reported_together() {
        let config = PolicyConfig {
            insured_age: 0,
            device_model: String::new(),
            ..policy_config()
        };

        let err = config.issue().unwrap_err();
        let message = err.to_string();
        assert_eq!(err.kind(), domain_policy::ErrorKind::Validation);
        assert!(message.contains("insured_age"), "{}", message);
        assert!(message.contains("device_model"), "{}", message);
    }

    #[test]
    fn test_server_addr() {
        let config = ApiConfig {
            port: 9000,
            ..ApiConfig::default()
        };
        assert_eq!(config.server_addr(), "0.0.0.0:9000");
    }
}
