//! Policy Domain
//!
//! This crate implements a single device protection policy as one
//! aggregate: the policy record and its depletable balance, the commission
//! ledger for the agent and broker, the claims registry, and the access
//! control gate in front of all of them.
//!
//! # Architecture
//!
//! - **Aggregate**: `Policy`, the only owner of policy state
//! - **Access**: `authorize` checks the caller before any other check
//! - **Domain Events**: recorded on every mutation, drained by the service
//! - **Service**: `PolicyService` publishes events through the `EventBus`
//!   and owns the funds transfer port
//!
//! # Policy Lifecycle
//!
//! ```text
//! Active (0) -> Finalized (2)
//! InClaim (1) is reserved and never entered
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{PolicyBuilder, PolicyService};
//!
//! let policy = PolicyBuilder::new()
//!     .customer(customer)
//!     .insured_name("Alex Silva")
//!     .insured_age(88)
//!     .coverage_value(coverage)
//!     .initial_balance(balance)
//!     .deductible(deductible)
//!     .device_model("Samsung Galaxy S7")
//!     .agent(agent)
//!     .broker(broker)
//!     .admin(admin)
//!     .build()?;
//!
//! let mut service = PolicyService::new(policy, book);
//! service.fnol(&customer, 1, claim_value)?;
//! ```

pub mod access;
pub mod aggregate;
pub mod events;
pub mod notifier;
pub mod error;
pub mod services;

pub use access::{authorize, Access, Operation, PolicyParties, Role};
pub use aggregate::{Policy, PolicyBuilder, PolicyStatus, MAX_INSURED_AGE};
pub use events::PolicyEvent;
pub use notifier::EventBus;
pub use error::{ErrorKind, PolicyError};
pub use services::PolicyService;
