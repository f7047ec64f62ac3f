//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger, storage and display
//! layers. Each handler opens a ledger over storage, so every mutation is
//! persisted before the command returns.

pub mod budget;
pub mod data;
pub mod export;
pub mod preferences;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use data::{handle_categories_command, handle_clear_command, handle_demo_command, DemoCommands};
pub use export::{handle_export_command, handle_import_command};
pub use preferences::{
    handle_config_command, handle_dark_mode_command, handle_period_command, ConfigCommands,
    DarkModeAction, PeriodCommands,
};
pub use report::{handle_breakdown_command, handle_summary_command};
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::FinanceResult;
use crate::models::Period;
use crate::storage::Storage;

/// An explicit `YYYY-MM` argument, or the stored selected month
pub fn resolve_period(storage: &Storage, explicit: Option<&str>) -> FinanceResult<Period> {
    match explicit {
        Some(key) => Period::parse(key),
        None => Ok(storage.selected_month()),
    }
}
