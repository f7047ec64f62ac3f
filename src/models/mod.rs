//! Core data models for the finance tracker
//!
//! Transactions, budgets, categories, and the monthly period they are
//! aggregated over.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{Budget, BudgetFormData};
pub use category::{all_categories, expense_categories, find_category, income_categories, Category};
pub use ids::{BudgetId, TransactionId};
pub use money::Money;
pub use period::{in_range, range_for_period, Period};
pub use transaction::{
    parse_date, parse_positive_amount, Transaction, TransactionFields, TransactionFormData,
    TransactionType,
};
