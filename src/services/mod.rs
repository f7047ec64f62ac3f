//! Service layer for the finance tracker
//!
//! Aggregation and filtering are pure functions over transaction slices.
//! The [`Ledger`] is the single writer for both collections and keeps every
//! budget's spent figure in step with the transactions.

pub mod demo;
pub mod filter;
pub mod import;
pub mod ledger;
pub mod summary;

pub use demo::generate_demo_data;
pub use filter::{filter_transactions, FilterOptions, TypeFilter};
pub use import::{parse_import, read_import_file};
pub use ledger::{ImportSummary, Ledger, LedgerObserver};
pub use summary::{
    calculate_budget_spent, category_breakdown, category_totals, summarize, top, totals,
    CategoryShare, CategoryTotals, MonthlyData,
};
