//! Demo data and reset commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{all_categories, Period};
use crate::services::generate_demo_data;
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Replace all transactions with a sample month
    Load,
}

pub fn handle_demo_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DemoCommands,
) -> FinanceResult<()> {
    match cmd {
        DemoCommands::Load => {
            let period = Period::current();
            let mut ledger = storage.open_ledger(settings.strict_categories);
            ledger.replace_transactions(generate_demo_data(period))?;
            storage.save_selected_month(period);

            println!(
                "Loaded {} demo transactions for {}",
                ledger.transactions().len(),
                period.label()
            );
        }
    }
    Ok(())
}

/// `finance clear --yes`
pub fn handle_clear_command(storage: &Storage, confirmed: bool) -> FinanceResult<()> {
    if !confirmed {
        return Err(FinanceError::Config(
            "refusing to delete all data without --yes".into(),
        ));
    }

    let mut ledger = storage.open_ledger(false);
    let (transactions, budgets) = (ledger.transactions().len(), ledger.budgets().len());
    ledger.clear_all();

    println!(
        "Deleted {} transaction(s) and {} budget(s)",
        transactions, budgets
    );
    Ok(())
}

/// `finance categories`
pub fn handle_categories_command() -> FinanceResult<()> {
    for category in all_categories() {
        println!("{:<8} {}", category.kind.as_str(), category.name);
    }
    Ok(())
}
