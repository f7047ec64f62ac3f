use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finance_tracker::cli::{
    handle_breakdown_command, handle_budget_command, handle_categories_command,
    handle_clear_command, handle_config_command, handle_dark_mode_command, handle_demo_command,
    handle_export_command, handle_import_command, handle_period_command, handle_summary_command,
    handle_transaction_command, BudgetCommands, ConfigCommands, DarkModeAction, DemoCommands,
    PeriodCommands, TransactionCommands,
};
use finance_tracker::config::{FinancePaths, Settings};
use finance_tracker::export::ExportFormat;
use finance_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "finance",
    version,
    about = "Personal finance tracker for the terminal",
    long_about = "Record income and expenses, set monthly budgets per category, \
                  and get monthly summaries, breakdowns and exports."
)]
struct Cli {
    /// Directory holding settings and data
    #[arg(long, global = true, env = "FINANCE_TRACKER_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Income, expenses and balance for a month
    Summary {
        /// Month (YYYY-MM), defaults to the selected month
        #[arg(short, long)]
        period: Option<String>,
        /// Also list income, expenses and net per category
        #[arg(long)]
        by_category: bool,
    },

    /// Expenses by category for a month
    Breakdown {
        /// Month (YYYY-MM), defaults to the selected month
        #[arg(short, long)]
        period: Option<String>,
        /// Number of categories to show
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Export a month as csv, json or md
    Export {
        /// csv, json or md
        format: ExportFormat,
        /// Month (YYYY-MM), defaults to the selected month
        #[arg(short, long)]
        period: Option<String>,
        /// Destination file, or "-" for stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import transactions from a JSON export
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Show or change the selected month
    Period {
        #[command(subcommand)]
        cmd: Option<PeriodCommands>,
    },

    /// Show or change the dark mode preference
    DarkMode {
        #[arg(value_enum)]
        action: Option<DarkModeAction>,
    },

    /// List the reference categories
    Categories,

    /// Sample data
    #[command(subcommand)]
    Demo(DemoCommands),

    /// Delete every transaction and budget
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => FinancePaths::with_base_dir(dir),
        None => FinancePaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Initialized finance tracker at: {}", paths.base_dir().display());
            println!();
            println!(
                "Run 'finance txn add expense 12.50 \"Food & Dining\" Lunch' to record a transaction."
            );
            println!("Run 'finance demo load' to try it with sample data.");
        }
        Some(Commands::Config { cmd }) => handle_config_command(&paths, &mut settings, cmd)?,
        Some(Commands::Txn(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Summary {
            period,
            by_category,
        }) => handle_summary_command(&storage, &settings, period, by_category)?,
        Some(Commands::Breakdown { period, top }) => {
            handle_breakdown_command(&storage, &settings, period, top)?
        }
        Some(Commands::Export {
            format,
            period,
            output,
        }) => handle_export_command(&storage, format, period, output)?,
        Some(Commands::Import { file }) => handle_import_command(&storage, &settings, file)?,
        Some(Commands::Period { cmd }) => handle_period_command(&storage, cmd)?,
        Some(Commands::DarkMode { action }) => handle_dark_mode_command(&storage, action)?,
        Some(Commands::Categories) => handle_categories_command()?,
        Some(Commands::Demo(cmd)) => handle_demo_command(&storage, &settings, cmd)?,
        Some(Commands::Clear { yes }) => handle_clear_command(&storage, yes)?,
        None => {
            println!("Finance Tracker - income, expenses and budgets from the terminal");
            println!();
            println!("Run 'finance --help' for usage information.");
        }
    }

    Ok(())
}
