//! CSV export
//!
//! One row per transaction, then a blank line and a summary block whose
//! values sit in the Amount column.

use std::io::Write;

use csv::WriterBuilder;
use tracing::info;

use super::{decimal, ExportData};
use crate::error::{FinanceError, FinanceResult};

const HEADERS: [&str; 6] = ["Date", "Type", "Category", "Description", "Amount", "Created At"];

pub fn export_csv<W: Write>(data: &ExportData, writer: &mut W) -> FinanceResult<()> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(&mut *writer);

    wtr.write_record(HEADERS).map_err(csv_error)?;

    for txn in &data.transactions {
        let date = txn.date.format("%Y-%m-%d").to_string();
        let created = txn.created_at.format("%Y-%m-%d %H:%M:%S").to_string();
        let amount = decimal(txn.amount);
        wtr.write_record([
            date.as_str(),
            txn.kind.as_str(),
            txn.category.as_str(),
            txn.description.as_str(),
            amount.as_str(),
            created.as_str(),
        ])
        .map_err(csv_error)?;
    }
    wtr.flush()?;
    drop(wtr);

    writeln!(writer)?;

    let summary = &data.summary;
    let period = summary.period.to_string();
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(&mut *writer);
    wtr.write_record(["Summary"]).map_err(csv_error)?;
    for (label, amount) in [
        ("Total Income", summary.total_income),
        ("Total Expenses", summary.total_expenses),
        ("Balance", summary.balance),
    ] {
        let amount = decimal(amount);
        wtr.write_record([label, "", "", "", amount.as_str(), ""])
            .map_err(csv_error)?;
    }
    wtr.write_record(["Period", period.as_str(), "", "", "", ""])
        .map_err(csv_error)?;
    wtr.flush()?;

    info!(period = %summary.period, rows = data.transactions.len(), "exported CSV");
    Ok(())
}

fn csv_error(e: csv::Error) -> FinanceError {
    FinanceError::Export(format!("Failed to write CSV: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    fn render(data: &ExportData) -> String {
        let mut out = Vec::new();
        export_csv(data, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_rows_and_summary_block() {
        let csv = render(&fixtures::march());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Date,Type,Category,Description,Amount,Created At");
        assert_eq!(
            lines[2],
            "2024-03-05,expense,Transportation,Fuel,50,2024-03-05 09:30:00"
        );
        assert_eq!(lines[3], "2024-03-01,income,Salary,March salary,1000,2024-03-01 09:30:00");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Summary");
        assert_eq!(lines[6], "Total Income,,,,1000,");
        assert_eq!(lines[7], "Total Expenses,,,,75.5,");
        assert_eq!(lines[8], "Balance,,,,924.5,");
        assert_eq!(lines[9], "Period,2024-03,,,,");
    }

    #[test]
    fn test_description_with_comma_is_quoted() {
        let csv = render(&fixtures::march());
        assert!(csv.contains("\"Lunch, with team\""));

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(csv.as_bytes());
        let first = reader.records().next().unwrap().unwrap();
        assert_eq!(&first[3], "Lunch, with team");
        assert_eq!(&first[4], "25.5");
    }

    #[test]
    fn test_empty_period_still_has_summary() {
        let mut data = fixtures::march();
        data.transactions.clear();
        let csv = render(&data);
        assert!(csv.starts_with("Date,Type"));
        assert!(csv.contains("\nSummary\n"));
    }
}
