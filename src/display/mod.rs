//! Display formatting for terminal output
//!
//! Plain-text tables for registers, budgets, summaries and breakdowns.

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::format_budget_list;
pub use report::{format_breakdown, format_category_totals, format_summary};
pub use transaction::{format_transaction_details, format_transaction_register, format_transaction_row};
