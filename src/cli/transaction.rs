//! Transaction CLI commands

use chrono::Local;
use clap::Subcommand;

use super::resolve_period;
use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{parse_date, TransactionFormData, TransactionType};
use crate::services::{totals, FilterOptions, TypeFilter};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new income or expense
    Add {
        /// income or expense
        #[arg(value_name = "TYPE")]
        kind: TransactionType,
        /// Positive amount, e.g. "12.50"
        amount: String,
        /// Category name
        category: String,
        /// Short description
        description: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// all, income or expense
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        kind: Option<TypeFilter>,
        /// Exact category name
        #[arg(short, long)]
        category: Option<String>,
        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: Option<String>,
        /// Case-insensitive text in description or category
        #[arg(short, long)]
        search: Option<String>,
        /// Restrict to one month (YYYY-MM)
        #[arg(short, long)]
        period: Option<String>,
        /// Use the selected month instead of the whole history
        #[arg(long, conflicts_with = "period")]
        selected: bool,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID or the short prefix shown by `list`
        id: String,
    },
    /// Edit a transaction; omitted fields keep their values
    Edit {
        /// Transaction ID or the short prefix shown by `list`
        id: String,
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        kind: Option<TransactionType>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short = 'D', long)]
        description: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID or the short prefix shown by `list`
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    let mut ledger = storage.open_ledger(settings.strict_categories);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            description,
            date,
        } => {
            let date =
                date.unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
            let form = TransactionFormData::new(kind, amount, category, description, date);
            let txn = ledger.add(&form)?;

            println!("Added {} {}: {}", txn.kind, txn.id, txn);
        }

        TransactionCommands::List {
            kind,
            category,
            from,
            to,
            search,
            period,
            selected,
            limit,
        } => {
            let mut options = FilterOptions::new();
            if let Some(kind) = kind {
                options = options.kind(kind);
            }
            if let Some(category) = category {
                options = options.category(category);
            }
            if let Some(from) = from {
                options = options.date_from(parse_date(&from)?);
            }
            if let Some(to) = to {
                options = options.date_to(parse_date(&to)?);
            }
            if let Some(search) = search {
                options = options.search(search);
            }

            let scoped;
            let source = if period.is_some() || selected {
                let period = resolve_period(storage, period.as_deref())?;
                scoped = ledger.summarize(period).transactions;
                scoped.as_slice()
            } else {
                ledger.transactions()
            };

            let mut matches = options.apply(source);
            let matched = matches.len();
            let (income, expenses) = totals(matches.iter().copied());
            matches.truncate(limit);
            print!("{}", format_transaction_register(&matches, settings));

            if options.is_active() || matched > matches.len() {
                let symbol = &settings.currency_symbol;
                println!(
                    "Showing {} of {} (income {}, expenses {})",
                    matches.len(),
                    source.len(),
                    income.format_with_symbol(symbol),
                    expenses.format_with_symbol(symbol)
                );
            }
        }

        TransactionCommands::Show { id } => {
            let id = ledger.resolve_id(&id)?;
            let txn = ledger
                .get(&id)
                .ok_or_else(|| FinanceError::transaction_not_found(id.as_str()))?;
            print!("{}", format_transaction_details(txn, settings));
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            category,
            description,
            date,
        } => {
            let id = ledger.resolve_id(&id)?;
            let current = ledger
                .get(&id)
                .ok_or_else(|| FinanceError::transaction_not_found(id.as_str()))?;

            let form = TransactionFormData::new(
                kind.unwrap_or(current.kind),
                amount.unwrap_or_else(|| current.amount.as_f64().to_string()),
                category.unwrap_or_else(|| current.category.clone()),
                description.unwrap_or_else(|| current.description.clone()),
                date.unwrap_or_else(|| current.date.format("%Y-%m-%d").to_string()),
            );
            let txn = ledger.update(&id, &form)?;

            println!("Updated {}: {}", txn.id, txn);
        }

        TransactionCommands::Delete { id } => {
            let id = ledger.resolve_id(&id)?;
            let removed = ledger.delete(&id)?;
            println!("Deleted {}: {}", removed.id, removed);
        }
    }

    Ok(())
}
