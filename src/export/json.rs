//! JSON export
//!
//! Writes the document shape that [`crate::services::parse_import`] reads.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ExportData, ExportSummary};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Period, Transaction};

pub const EXPORT_VERSION: &str = "1.0";
pub const EXPORT_FORMAT: &str = "finance-tracker-export";

/// Top-level export document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonExport {
    pub export_date: DateTime<Utc>,
    pub period: Period,
    pub summary: ExportSummary,
    pub transactions: Vec<Transaction>,
    pub meta: ExportMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMeta {
    pub version: String,
    pub format: String,
}

impl JsonExport {
    pub fn new(data: &ExportData) -> Self {
        Self {
            export_date: Utc::now(),
            period: data.summary.period,
            summary: data.summary.clone(),
            transactions: data.transactions.clone(),
            meta: ExportMeta {
                version: EXPORT_VERSION.to_string(),
                format: EXPORT_FORMAT.to_string(),
            },
        }
    }
}

pub fn export_json<W: Write>(data: &ExportData, writer: &mut W) -> FinanceResult<()> {
    let document = JsonExport::new(data);
    serde_json::to_writer_pretty(&mut *writer, &document)
        .map_err(|e| FinanceError::Export(format!("Failed to write JSON: {}", e)))?;
    writeln!(writer)?;

    info!(period = %data.summary.period, rows = data.transactions.len(), "exported JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;
    use crate::services::parse_import;

    #[test]
    fn test_document_shape() {
        let mut out = Vec::new();
        export_json(&fixtures::march(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["period"], "2024-03");
        assert_eq!(value["summary"]["totalIncome"], 1000);
        assert_eq!(value["summary"]["totalExpenses"], 75.5);
        assert_eq!(value["summary"]["balance"], 924.5);
        assert_eq!(value["summary"]["period"], "2024-03");
        assert_eq!(value["meta"]["version"], "1.0");
        assert_eq!(value["meta"]["format"], "finance-tracker-export");
        assert!(value["exportDate"].is_string());
        assert_eq!(value["transactions"][0]["type"], "expense");
        assert_eq!(value["transactions"][0]["createdAt"], "2024-03-12T09:30:00Z");
    }

    #[test]
    fn test_export_is_importable() {
        let data = fixtures::march();
        let mut out = Vec::new();
        export_json(&data, &mut out).unwrap();

        let imported = parse_import(std::str::from_utf8(&out).unwrap()).unwrap();
        assert_eq!(imported, data.transactions);
    }
}
