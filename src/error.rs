//! Custom error types for the finance tracker
//!
//! Every failure is scoped to a single operation. Validation errors are
//! raised before any state changes, so a failed call leaves the ledger intact.

use thiserror::Error;

/// The main error type for finance tracker operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Malformed period key (expected `YYYY-MM`)
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Amount could not be parsed or was not positive
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A required form field was empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A date string was not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Category is not part of the reference set for the transaction type
    #[error("Unknown {kind} category: {name}")]
    UnknownCategory { name: String, kind: String },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FinanceError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an input validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidPeriod(_)
                | Self::InvalidAmount(_)
                | Self::MissingField(_)
                | Self::InvalidDate(_)
                | Self::UnknownCategory { .. }
        )
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for finance tracker operations
pub type FinanceResult<T> = Result<T, FinanceError>;
