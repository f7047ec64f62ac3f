//! Budget CLI commands

use clap::Subcommand;

use super::resolve_period;
use crate::config::Settings;
use crate::display::format_budget_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::BudgetFormData;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set a spending limit for an expense category
    Add {
        /// Category name
        category: String,
        /// Monthly limit, e.g. "400"
        amount: String,
        /// Month (YYYY-MM), defaults to the selected month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List budgets with their spend
    List {
        /// Month (YYYY-MM), defaults to the selected month
        #[arg(short, long)]
        month: Option<String>,
        /// Show budgets for every month
        #[arg(short, long, conflicts_with = "month")]
        all: bool,
    },

    /// Change a budget's category or limit
    Edit {
        /// Budget ID
        id: String,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
    },

    /// Remove a budget
    Delete {
        /// Budget ID
        id: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FinanceResult<()> {
    let mut ledger = storage.open_ledger(settings.strict_categories);

    match cmd {
        BudgetCommands::Add {
            category,
            amount,
            month,
        } => {
            let month = resolve_period(storage, month.as_deref())?;
            let budget = ledger.add_budget(&BudgetFormData::new(category, amount), month)?;

            println!("Created budget {}", budget.id);
            println!("  {}", budget);
        }

        BudgetCommands::List { month, all } => {
            let budgets: Vec<_> = if all {
                ledger.budgets().iter().collect()
            } else {
                let month = resolve_period(storage, month.as_deref())?;
                println!("Budgets for {}", month.label());
                println!();
                ledger.budgets().iter().filter(|b| b.month == month).collect()
            };
            print!("{}", format_budget_list(&budgets, settings));
        }

        BudgetCommands::Edit {
            id,
            category,
            amount,
        } => {
            let id = ledger.resolve_budget_id(&id)?;
            let current = ledger
                .get_budget(&id)
                .ok_or_else(|| FinanceError::budget_not_found(id.as_str()))?;

            let form = BudgetFormData::new(
                category.unwrap_or_else(|| current.category.clone()),
                amount.unwrap_or_else(|| current.amount.as_f64().to_string()),
            );
            let budget = ledger.update_budget(&id, &form)?;

            println!("Updated budget {}", budget.id);
            println!("  {}", budget);
        }

        BudgetCommands::Delete { id } => {
            let id = ledger.resolve_budget_id(&id)?;
            let removed = ledger.delete_budget(&id)?;
            println!("Deleted budget {} ({})", removed.id, removed);
        }
    }

    Ok(())
}
