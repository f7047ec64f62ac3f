//! Filter engine
//!
//! Applies a composable predicate set to a transaction slice. All present
//! predicates must pass (logical AND); within the search predicate a hit on
//! either description or category is enough.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FinanceError;
use crate::models::{Transaction, TransactionType};

/// Type axis of a filter; `All` places no constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    fn matches(&self, kind: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == TransactionType::Income,
            Self::Expense => kind == TransactionType::Expense,
        }
    }
}

impl From<TransactionType> for TypeFilter {
    fn from(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Income => Self::Income,
            TransactionType::Expense => Self::Expense,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(FinanceError::Config(format!(
                "unknown type filter '{}' (expected all, income or expense)",
                other
            ))),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// Options for filtering transactions; every field absent means no constraint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TypeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by transaction type
    pub fn kind(mut self, kind: impl Into<TypeFilter>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Filter by exact category name
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Only transactions on or after `date`
    pub fn date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    /// Only transactions on or before `date`
    pub fn date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    /// Case-insensitive substring search over description and category
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Whether any axis constrains the result
    pub fn is_active(&self) -> bool {
        !matches!(self.kind, None | Some(TypeFilter::All))
            || self.category.is_some()
            || self.date_from.is_some()
            || self.date_to.is_some()
            || self.search_term().is_some()
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Check a single transaction against every present predicate
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.matches_with(txn, self.search_term().as_deref())
    }

    fn matches_with(&self, txn: &Transaction, needle: Option<&str>) -> bool {
        if let Some(kind) = self.kind {
            if !kind.matches(txn.kind) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &txn.category != category {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if txn.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if txn.date > to {
                return false;
            }
        }
        if let Some(needle) = needle {
            let hit = txn.description.to_lowercase().contains(needle)
                || txn.category.to_lowercase().contains(needle);
            if !hit {
                return false;
            }
        }
        true
    }

    /// Apply the filter, preserving input order
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let needle = self.search_term();
        transactions
            .iter()
            .filter(|t| self.matches_with(t, needle.as_deref()))
            .collect()
    }
}

/// Convenience wrapper returning owned clones
pub fn filter_transactions(transactions: &[Transaction], options: &FilterOptions) -> Vec<Transaction> {
    options.apply(transactions).into_iter().cloned().collect()
}
