//! Strongly-typed identifiers for the policy, its parties and transfers
//!
//! Caller identities are `PartyId`s; the host environment authenticates the
//! caller and hands the resolved id to every mutating policy operation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Rejected identifier text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("expected a {expected} id, got prefix {found}")]
    WrongPrefix { expected: &'static str, found: String },

    #[error("malformed {kind} id: {value}")]
    Malformed { kind: &'static str, value: String },
}

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        /// Accepts `PREFIX-<uuid>` or a bare uuid
        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let uuid_str = match s.split_once('-') {
                    Some((head, rest)) if head.len() == 3 && head.chars().all(|c| c.is_ascii_uppercase()) => {
                        if head != $prefix {
                            return Err(IdError::WrongPrefix {
                                expected: $prefix,
                                found: head.to_string(),
                            });
                        }
                        rest
                    }
                    _ => s,
                };

                Uuid::parse_str(uuid_str)
                    .map(Self)
                    .map_err(|_| IdError::Malformed {
                        kind: $prefix,
                        value: s.to_string(),
                    })
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Policy aggregate identifiers
define_id!(PolicyId, "POL");

// Parties taking part in a policy (customer, agent, broker, admin)
define_id!(PartyId, "PTY");

// Value transfers settled through the funds transfer port
define_id!(TransferId, "TRF");

// Event bus subscriptions
define_id!(SubscriptionId, "SUB");
