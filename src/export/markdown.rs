//! Markdown report

use std::fmt::Write as _;
use std::io::Write;

use chrono::NaiveDate;
use tracing::info;

use super::ExportData;
use crate::error::FinanceResult;
use crate::models::{Money, Transaction, TransactionType};

/// Number of entries in the "Recent Transactions" section
const RECENT_LIMIT: usize = 10;

/// Render the report as a string
pub fn generate_report(data: &ExportData, generated_on: NaiveDate) -> String {
    let summary = &data.summary;
    let mut out = String::new();

    let _ = writeln!(out, "# Financial Report - {}", summary.period);
    out.push('\n');
    out.push_str("## Summary\n");
    let _ = writeln!(out, "- **Total Income**: {}", summary.total_income);
    let _ = writeln!(out, "- **Total Expenses**: {}", summary.total_expenses);
    let _ = writeln!(out, "- **Net Balance**: {}", summary.balance);
    let _ = writeln!(out, "- **Transaction Count**: {}", data.transactions.len());

    for (title, kind) in [
        ("Income Breakdown", TransactionType::Income),
        ("Expense Breakdown", TransactionType::Expense),
    ] {
        let _ = write!(out, "\n## {}\n", title);
        let rows = breakdown(&data.transactions, kind);
        if rows.is_empty() {
            out.push_str("_None recorded_\n");
        }
        for (category, amount) in rows {
            let _ = writeln!(out, "- **{}**: {}", category, amount);
        }
    }

    out.push_str("\n## Recent Transactions\n");
    for txn in recent(&data.transactions) {
        let sign = if txn.is_income() { '+' } else { '-' };
        let _ = writeln!(
            out,
            "- {} | {}{} | {} | {}",
            txn.date.format("%Y-%m-%d"),
            sign,
            txn.amount,
            txn.category,
            txn.description
        );
    }

    out.push_str("\n---\n");
    let _ = write!(
        out,
        "Generated on {} by Finance Tracker",
        generated_on.format("%B %-d, %Y")
    );

    out
}

pub fn export_markdown<W: Write>(
    data: &ExportData,
    generated_on: NaiveDate,
    writer: &mut W,
) -> FinanceResult<()> {
    writeln!(writer, "{}", generate_report(data, generated_on))?;
    info!(period = %data.summary.period, "exported Markdown report");
    Ok(())
}

/// Per-category totals for one type, largest first; ties keep first-seen order
fn breakdown(transactions: &[Transaction], kind: TransactionType) -> Vec<(&str, Money)> {
    let mut rows: Vec<(&str, Money)> = Vec::new();
    for txn in transactions.iter().filter(|t| t.kind == kind) {
        match rows.iter_mut().find(|(c, _)| *c == txn.category) {
            Some((_, total)) => *total += txn.amount,
            None => rows.push((txn.category.as_str(), txn.amount)),
        }
    }
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

/// Newest first by date, then by creation time
fn recent(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
    sorted.truncate(RECENT_LIMIT);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    fn generated_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
    }

    #[test]
    fn test_report_sections() {
        let report = generate_report(&fixtures::march(), generated_on());

        assert!(report.starts_with("# Financial Report - 2024-03\n"));
        assert!(report.contains("- **Total Income**: $1000.00"));
        assert!(report.contains("- **Total Expenses**: $75.50"));
        assert!(report.contains("- **Net Balance**: $924.50"));
        assert!(report.contains("- **Transaction Count**: 3"));
        assert!(report.contains("## Income Breakdown\n- **Salary**: $1000.00\n"));
        assert!(report.ends_with("---\nGenerated on April 2, 2024 by Finance Tracker"));
    }

    #[test]
    fn test_expense_breakdown_sorted_descending() {
        let report = generate_report(&fixtures::march(), generated_on());
        let fuel = report.find("- **Transportation**: $50.00").unwrap();
        let food = report.find("- **Food & Dining**: $25.50").unwrap();
        assert!(fuel < food);
    }

    #[test]
    fn test_recent_transactions_newest_first() {
        let report = generate_report(&fixtures::march(), generated_on());
        let section = report.split("## Recent Transactions\n").nth(1).unwrap();
        let lines: Vec<&str> = section.lines().take(3).collect();

        assert_eq!(
            lines[0],
            "- 2024-03-12 | -$25.50 | Food & Dining | Lunch, with team"
        );
        assert_eq!(lines[2], "- 2024-03-01 | +$1000.00 | Salary | March salary");
    }

    #[test]
    fn test_recent_is_capped() {
        let mut data = fixtures::march();
        let template = data.transactions[0].clone();
        for i in 0..15 {
            let mut txn = template.clone();
            txn.id = format!("extra-{}", i).as_str().into();
            data.transactions.push(txn);
        }
        assert_eq!(recent(&data.transactions).len(), RECENT_LIMIT);
    }

    #[test]
    fn test_negative_balance_rendering() {
        let mut data = fixtures::march();
        data.summary.balance = Money::from_cents(-5000);
        let report = generate_report(&data, generated_on());
        assert!(report.contains("- **Net Balance**: -$50.00"));
    }
}
