//! Budget model
//!
//! A budget is a spending limit for one expense category in one month. Its
//! `spent` figure is a cache of [`calculate_budget_spent`]: there is no
//! setter, only [`Budget::recompute`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;
use super::period::Period;
use super::transaction::{parse_positive_amount, required, Transaction};
use crate::error::{FinanceError, FinanceResult};
use crate::services::summary::calculate_budget_spent;

/// A per-category, per-month spending limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub category: String,

    /// The limit for the month
    pub amount: Money,

    /// Derived from the transaction collection
    #[serde(default)]
    spent: Money,

    pub month: Period,
}

impl Budget {
    /// Create a budget with `spent` computed from the given transactions
    pub fn new(
        category: impl Into<String>,
        amount: Money,
        month: Period,
        transactions: &[Transaction],
    ) -> Self {
        let mut budget = Self {
            id: BudgetId::new(),
            category: category.into(),
            amount,
            spent: Money::zero(),
            month,
        };
        budget.recompute(transactions);
        budget
    }

    pub fn spent(&self) -> Money {
        self.spent
    }

    /// Recompute `spent` from the authoritative transaction collection
    pub fn recompute(&mut self, transactions: &[Transaction]) {
        self.spent = calculate_budget_spent(transactions, &self.category, self.month);
    }

    /// Whether a transaction with this category and date would count toward the budget
    pub fn tracks(&self, category: &str, month: Period) -> bool {
        self.category == category && self.month == month
    }

    /// Remaining allowance; negative when overspent
    pub fn remaining(&self) -> Money {
        self.amount - self.spent
    }

    pub fn is_overspent(&self) -> bool {
        self.spent > self.amount
    }

    /// Check the stored invariants
    pub fn validate(&self) -> FinanceResult<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(FinanceError::MissingField("id"));
        }
        if !self.amount.is_positive() || !self.amount.within_limit() {
            return Err(FinanceError::InvalidAmount(self.amount.to_string()));
        }
        required(&self.category, "category")?;
        Ok(())
    }

    /// Share of the limit used so far, as a percentage
    pub fn percent_used(&self) -> f64 {
        if self.amount.is_zero() {
            return 0.0;
        }
        self.spent.cents() as f64 / self.amount.cents() as f64 * 100.0
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} of {}",
            self.month, self.category, self.spent, self.amount
        )
    }
}

/// Raw user input for creating or editing a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetFormData {
    pub category: String,
    pub amount: String,
}

impl BudgetFormData {
    pub fn new(category: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            amount: amount.into(),
        }
    }

    /// Validate into a (category, limit) pair
    pub fn validate(&self) -> FinanceResult<(String, Money)> {
        let amount = parse_positive_amount(&self.amount)?;
        let category = required(&self.category, "category")?;
        Ok((category.to_string(), amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinanceError;
    use crate::models::TransactionType;
    use chrono::NaiveDate;

    fn expense(cents: i64, category: &str, date: &str) -> Transaction {
        Transaction::new(
            TransactionType::Expense,
            Money::from_cents(cents),
            category,
            "test",
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        )
    }

    #[test]
    fn test_new_budget_computes_spent() {
        let txns = vec![
            expense(5000, "Food", "2024-03-05"),
            expense(2500, "Food", "2024-03-20"),
            expense(3000, "Food", "2024-04-02"),
            expense(9900, "Travel", "2024-03-10"),
        ];
        let march = Period::parse("2024-03").unwrap();
        let budget = Budget::new("Food", Money::from_cents(10_000), march, &txns);

        assert_eq!(budget.spent().cents(), 7500);
        assert_eq!(budget.remaining().cents(), 2500);
        assert!(!budget.is_overspent());
        assert!((budget.percent_used() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recompute_replaces_cached_value() {
        let march = Period::parse("2024-03").unwrap();
        let mut txns = vec![expense(5000, "Food", "2024-03-05")];
        let mut budget = Budget::new("Food", Money::from_cents(4000), march, &txns);
        assert!(budget.is_overspent());

        txns.clear();
        budget.recompute(&txns);
        assert!(budget.spent().is_zero());
    }

    #[test]
    fn test_form_validation() {
        let (category, amount) = BudgetFormData::new("Food", "250").validate().unwrap();
        assert_eq!(category, "Food");
        assert_eq!(amount.cents(), 25_000);

        assert!(matches!(
            BudgetFormData::new("Food", "-1").validate(),
            Err(FinanceError::InvalidAmount(_))
        ));
        assert!(matches!(
            BudgetFormData::new("", "10").validate(),
            Err(FinanceError::MissingField("category"))
        ));
    }

    #[test]
    fn test_serialization() {
        let march = Period::parse("2024-03").unwrap();
        let budget = Budget::new("Food", Money::from_cents(20_000), march, &[]);
        let value = serde_json::to_value(&budget).unwrap();
        assert_eq!(value["month"], "2024-03");
        assert_eq!(value["amount"], 200);
        assert_eq!(value["spent"], 0);

        let back: Budget = serde_json::from_value(value).unwrap();
        assert_eq!(back, budget);
    }
}
