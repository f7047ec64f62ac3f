//! Summary and breakdown CLI commands

use super::resolve_period;
use crate::config::Settings;
use crate::display::{format_breakdown, format_category_totals, format_summary};
use crate::error::FinanceResult;
use crate::services::{category_breakdown, category_totals};
use crate::storage::Storage;

/// `finance summary [--period] [--by-category]`
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    period: Option<String>,
    by_category: bool,
) -> FinanceResult<()> {
    let period = resolve_period(storage, period.as_deref())?;
    let ledger = storage.open_ledger(settings.strict_categories);

    let data = ledger.summarize(period);
    print!("{}", format_summary(&data, settings));

    if by_category && !data.transactions.is_empty() {
        println!();
        let rows = category_totals(&data.transactions, period);
        print!("{}", format_category_totals(&rows, settings));
    }
    Ok(())
}

/// `finance breakdown [--period] [--top N]`
pub fn handle_breakdown_command(
    storage: &Storage,
    settings: &Settings,
    period: Option<String>,
    top: Option<usize>,
) -> FinanceResult<()> {
    let period = resolve_period(storage, period.as_deref())?;
    let transactions = storage.load_state().transactions;

    let breakdown = category_breakdown(&transactions, period);
    println!("Expenses by category, {}", period.label());
    println!();
    print!(
        "{}",
        format_breakdown(&breakdown, top.unwrap_or(settings.breakdown_limit), settings)
    );
    Ok(())
}
