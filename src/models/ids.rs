//! Strongly-typed ID wrappers for ledger entities
//!
//! IDs are opaque strings: freshly created entities get a prefixed UUID,
//! while imported records keep whatever identifier they were exported with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(format!("{}{}", $prefix, Uuid::new_v4().simple()))
            }

            /// Wrap an existing identifier
            pub fn from_raw(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Get the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Short form used in listings (prefix plus 8 characters)
            pub fn short(&self) -> &str {
                let len = $prefix.len() + 8;
                if self.0.starts_with($prefix) && self.0.len() > len {
                    &self.0[..len]
                } else {
                    &self.0
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(BudgetId, "bud-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        let a = TransactionId::new();
        let b = TransactionId::new();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("txn-"));
    }

    #[test]
    fn test_short_form() {
        let id = BudgetId::new();
        assert_eq!(id.short().len(), 12);
        assert!(id.short().starts_with("bud-"));

        let imported = TransactionId::from_raw("demo-1");
        assert_eq!(imported.short(), "demo-1");
    }

    #[test]
    fn test_id_serialization_is_plain_string() {
        let id = TransactionId::from_raw("demo-7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"demo-7\"");

        let back: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
