//! Transaction display formatting

use super::report::truncate;
use crate::config::Settings;
use crate::models::Transaction;

/// One register row: date, id, category, description, signed amount
pub fn format_transaction_row(txn: &Transaction, settings: &Settings) -> String {
    format!(
        "{:<12} {:<14} {:<18} {:<24} {:>12}",
        txn.date.format(&settings.date_format),
        txn.id.short(),
        truncate(&txn.category, 18),
        truncate(&txn.description, 24),
        txn.signed_amount().format_with_symbol(&settings.currency_symbol)
    )
}

/// Format a list of transactions as a register with a net total
pub fn format_transaction_register(transactions: &[&Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12} {:<14} {:<18} {:<24} {:>12}\n",
        "Date", "ID", "Category", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(84));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, settings));
        output.push('\n');
    }

    let net: crate::models::Money = transactions.iter().map(|t| t.signed_amount()).sum();
    output.push_str(&"-".repeat(84));
    output.push('\n');
    output.push_str(&format!(
        "{:>71} {:>12}\n",
        format!("{} transaction(s), net:", transactions.len()),
        net.format_with_symbol(&settings.currency_symbol)
    ));

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Date:        {}\n", txn.date.format(&settings.date_format)));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!(
        "Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
