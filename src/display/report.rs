//! Report formatting for terminal output
//!
//! Monthly summaries and category breakdowns, plus the small layout helpers
//! the other display modules share.

use crate::config::Settings;
use crate::models::Money;
use crate::services::{top, CategoryShare, CategoryTotals, MonthlyData};

const WIDTH: usize = 52;

/// Monthly totals block
pub fn format_summary(data: &MonthlyData, settings: &Settings) -> String {
    let symbol = settings.currency_symbol.as_str();
    let mut output = String::new();

    output.push_str(&format!("{}\n", data.period.label()));
    output.push_str(&double_separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<20}{:>32}\n",
        "Income",
        data.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<20}{:>32}\n",
        "Expenses",
        data.total_expenses.format_with_symbol(symbol)
    ));
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<20}{:>32}\n",
        "Balance",
        data.balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!("{:<20}{:>32}\n", "Transactions", data.transaction_count()));

    if !data.budgets.is_empty() {
        let (limit, spent) = data
            .budgets
            .iter()
            .fold((Money::zero(), Money::zero()), |(l, s), b| (l + b.amount, s + b.spent()));
        output.push_str(&format!(
            "{:<20}{:>32}\n",
            "Budgeted",
            format!(
                "{} of {}",
                spent.format_with_symbol(symbol),
                limit.format_with_symbol(symbol)
            )
        ));
    }

    output
}

/// Expense breakdown table, largest categories first
pub fn format_breakdown(breakdown: &[CategoryShare], limit: usize, settings: &Settings) -> String {
    if breakdown.is_empty() {
        return "No expenses recorded for this period.\n".to_string();
    }

    let shown = top(breakdown, limit);
    let max = shown.first().map(|s| s.amount.cents()).unwrap_or(0) as f64;

    let mut output = String::new();
    output.push_str(&format!(
        "{:<20} {:>12} {:>7}  {}\n",
        "Category", "Amount", "Share", ""
    ));
    output.push_str(&separator(WIDTH + 10));
    output.push('\n');

    for share in shown {
        output.push_str(&format!(
            "{:<20} {:>12} {:>7}  {}\n",
            truncate(&share.category, 20),
            share.amount.format_with_symbol(&settings.currency_symbol),
            format_percentage(share.percentage_of_total),
            format_bar(share.amount.cents() as f64, max, 10)
        ));
    }

    if breakdown.len() > shown.len() {
        output.push_str(&format!(
            "... and {} more\n",
            breakdown.len() - shown.len()
        ));
    }

    output
}

/// Per-category income, expense and net columns
pub fn format_category_totals(rows: &[CategoryTotals], settings: &Settings) -> String {
    let symbol = settings.currency_symbol.as_str();
    let mut output = String::new();
    output.push_str(&format!(
        "{:<20} {:>12} {:>12} {:>12}\n",
        "Category", "Income", "Expenses", "Net"
    ));
    output.push_str(&separator(WIDTH + 7));
    output.push('\n');

    for row in rows {
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>12}\n",
            truncate(&row.category, 20),
            row.income.format_with_symbol(symbol),
            row.expense.format_with_symbol(symbol),
            row.net.format_with_symbol(symbol)
        ));
    }

    output
}

/// Format a percentage with one decimal place
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate to at most `max_len` characters, ending in "..." when cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
