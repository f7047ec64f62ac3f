//! JSON import service
//!
//! Reads the document shape written by the JSON exporter and turns each
//! record into a [`Transaction`]. Validation covers the whole batch before
//! anything is returned: one bad record rejects the import.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{parse_date, Money, Transaction, TransactionId, TransactionType};

/// Parse an export document into a validated batch
pub fn parse_import(content: &str) -> FinanceResult<Vec<Transaction>> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| FinanceError::Import(format!("not a JSON document: {}", e)))?;

    let records = document
        .get("transactions")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            FinanceError::Import("invalid format: expected a 'transactions' array".into())
        })?;

    let now = Utc::now();
    let mut seen = HashSet::new();
    let mut batch = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let txn = parse_record(record, now)
            .map_err(|reason| FinanceError::Import(format!("record {}: {}", index, reason)))?;

        if !seen.insert(txn.id.clone()) {
            return Err(FinanceError::Import(format!(
                "record {}: duplicate id '{}'",
                index, txn.id
            )));
        }
        batch.push(txn);
    }

    Ok(batch)
}

/// Read and parse an export file from disk
pub fn read_import_file(path: &Path) -> FinanceResult<Vec<Transaction>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| FinanceError::Io(format!("failed to read {}: {}", path.display(), e)))?;
    let batch = parse_import(&content)?;
    info!(path = %path.display(), records = batch.len(), "parsed import file");
    Ok(batch)
}

fn parse_record(record: &Value, now: DateTime<Utc>) -> Result<Transaction, String> {
    let fields = record
        .as_object()
        .ok_or_else(|| "expected an object".to_string())?;

    let id = text_field(fields, "id")?;
    let kind: TransactionType = text_field(fields, "type")?
        .parse()
        .map_err(|_| "type must be 'income' or 'expense'".to_string())?;
    let amount = amount_field(fields)?;
    let category = text_field(fields, "category")?;
    let description = text_field(fields, "description")?;
    let date = parse_date(&text_field(fields, "date")?).map_err(|e| e.to_string())?;

    let created_at = match fields.get("createdAt") {
        None | Some(Value::Null) => now,
        Some(Value::String(raw)) => parse_timestamp(raw)
            .ok_or_else(|| format!("invalid createdAt '{}'", raw))?,
        Some(_) => return Err("createdAt must be a string".into()),
    };

    Ok(Transaction {
        id: TransactionId::from_raw(id),
        kind,
        amount,
        category,
        description,
        date,
        created_at,
    })
}

fn text_field(fields: &Map<String, Value>, name: &str) -> Result<String, String> {
    match fields.get(name) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(Value::Number(n)) if name == "id" => Ok(n.to_string()),
        Some(Value::String(_)) => Err(format!("'{}' is empty", name)),
        Some(_) => Err(format!("'{}' must be a string", name)),
        None => Err(format!("missing '{}'", name)),
    }
}

fn amount_field(fields: &Map<String, Value>) -> Result<Money, String> {
    let amount = match fields.get("amount") {
        Some(Value::Number(n)) => n.as_f64().and_then(Money::from_f64),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().and_then(Money::from_f64),
        Some(_) => None,
        None => return Err("missing 'amount'".into()),
    }
    .ok_or_else(|| "amount must be numeric".to_string())?;

    if !amount.is_positive() {
        return Err(format!("amount must be positive, got {}", amount));
    }
    if !amount.within_limit() {
        return Err(format!("amount {} exceeds the maximum of {}", amount, Money::MAX_AMOUNT));
    }
    Ok(amount)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
