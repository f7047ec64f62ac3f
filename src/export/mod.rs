//! Export module for the finance tracker
//!
//! Serialises one period's transactions and totals:
//! - CSV: spreadsheet-compatible rows plus a summary block
//! - JSON: the document shape that `import` reads back
//! - Markdown: a human-readable report

pub mod csv;
pub mod json;
pub mod markdown;

pub use self::csv::export_csv;
pub use self::json::{export_json, JsonExport, EXPORT_FORMAT, EXPORT_VERSION};
pub use self::markdown::{export_markdown, generate_report};

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, Period, Transaction};
use crate::services::MonthlyData;

/// Totals carried alongside exported transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,
    pub period: Period,
}

/// The view every exporter works from
#[derive(Debug, Clone, PartialEq)]
pub struct ExportData {
    pub transactions: Vec<Transaction>,
    pub summary: ExportSummary,
}

impl From<MonthlyData> for ExportData {
    fn from(data: MonthlyData) -> Self {
        Self {
            summary: ExportSummary {
                total_income: data.total_income,
                total_expenses: data.total_expenses,
                balance: data.balance,
                period: data.period,
            },
            transactions: data.transactions,
        }
    }
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }

    /// Default file name for a period, e.g. `finance-tracker-2024-03.csv`
    pub fn file_name(&self, period: Period) -> String {
        match self {
            Self::Markdown => format!("finance-report-{}.md", period),
            _ => format!("finance-tracker-{}.{}", period, self.extension()),
        }
    }

    /// Write `data` in this format
    pub fn write<W: Write>(&self, data: &ExportData, writer: &mut W) -> FinanceResult<()> {
        match self {
            Self::Csv => export_csv(data, writer),
            Self::Json => export_json(data, writer),
            Self::Markdown => export_markdown(data, Local::now().date_naive(), writer),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "md" | "markdown" => Ok(Self::Markdown),
            other => Err(FinanceError::Export(format!("Unknown format: {}", other))),
        }
    }
}

/// Plain decimal rendering used in CSV cells: `12.5`, `1000`, `-3.25`
pub(crate) fn decimal(amount: Money) -> String {
    amount.as_f64().to_string()
}
