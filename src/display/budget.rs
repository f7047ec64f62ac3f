//! Budget display formatting

use super::report::{format_bar, format_percentage, truncate};
use crate::config::Settings;
use crate::models::Budget;

/// Budgets with limit, spend and a usage bar; overspent rows are flagged
pub fn format_budget_list(budgets: &[&Budget], settings: &Settings) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let symbol = settings.currency_symbol.as_str();
    let mut output = String::new();
    output.push_str(&format!(
        "{:<14} {:<8} {:<18} {:>11} {:>11} {:>7}  {}\n",
        "ID", "Month", "Category", "Spent", "Limit", "Used", ""
    ));
    output.push_str(&"-".repeat(86));
    output.push('\n');

    for budget in budgets {
        let flag = if budget.is_overspent() { " OVER" } else { "" };
        output.push_str(&format!(
            "{:<14} {:<8} {:<18} {:>11} {:>11} {:>7}  {}{}\n",
            budget.id.short(),
            budget.month.to_string(),
            truncate(&budget.category, 18),
            budget.spent().format_with_symbol(symbol),
            budget.amount.format_with_symbol(symbol),
            format_percentage(budget.percent_used()),
            format_bar(budget.percent_used().min(100.0), 100.0, 10),
            flag
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Period, Transaction, TransactionType};
    use chrono::NaiveDate;

    #[test]
    fn test_budget_list_flags_overspent() {
        let march = Period::parse("2024-03").unwrap();
        let txns = vec![Transaction::new(
            TransactionType::Expense,
            Money::from_cents(15_000),
            "Food",
            "Dinner party",
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        )];
        let over = Budget::new("Food", Money::from_cents(10_000), march, &txns);
        let fine = Budget::new("Travel", Money::from_cents(10_000), march, &txns);

        let output = format_budget_list(&[&over, &fine], &Settings::default());
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[2].contains("150.0%"));
        assert!(lines[2].ends_with("OVER"));
        assert!(!lines[3].contains("OVER"));
    }

    #[test]
    fn test_empty_budget_list() {
        assert!(format_budget_list(&[], &Settings::default()).contains("No budgets"));
    }
}
