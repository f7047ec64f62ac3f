//! Selected month, dark mode and settings commands

use clap::{Subcommand, ValueEnum};

use crate::config::{FinancePaths, Settings};
use crate::error::FinanceResult;
use crate::models::Period;
use crate::storage::Storage;

/// Selected-month subcommands
#[derive(Subcommand)]
pub enum PeriodCommands {
    /// Print the selected month
    Show,
    /// Select a month (YYYY-MM)
    Set { month: String },
    /// Move to the following month
    Next,
    /// Move to the previous month
    Prev,
    /// Jump back to the current calendar month
    Today,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DarkModeAction {
    On,
    Off,
    Toggle,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,
    /// Change a setting, e.g. `config set strict_categories true`
    Set { key: String, value: String },
}

pub fn handle_period_command(storage: &Storage, cmd: Option<PeriodCommands>) -> FinanceResult<()> {
    let selected = storage.selected_month();

    let next = match cmd.unwrap_or(PeriodCommands::Show) {
        PeriodCommands::Show => None,
        PeriodCommands::Set { month } => Some(Period::parse(&month)?),
        PeriodCommands::Next => Some(selected.next()),
        PeriodCommands::Prev => Some(selected.prev()),
        PeriodCommands::Today => Some(Period::current()),
    };

    match next {
        Some(period) => {
            storage.save_selected_month(period);
            println!("Selected month: {} ({})", period, period.label());
        }
        None => println!("{} ({})", selected, selected.label()),
    }
    Ok(())
}

pub fn handle_dark_mode_command(storage: &Storage, action: Option<DarkModeAction>) -> FinanceResult<()> {
    let current = storage.dark_mode();

    let enabled = match action {
        None => {
            println!("Dark mode: {}", if current { "on" } else { "off" });
            return Ok(());
        }
        Some(DarkModeAction::On) => true,
        Some(DarkModeAction::Off) => false,
        Some(DarkModeAction::Toggle) => !current,
    };

    storage.save_dark_mode(enabled);
    println!("Dark mode: {}", if enabled { "on" } else { "off" });
    Ok(())
}

pub fn handle_config_command(
    paths: &FinancePaths,
    settings: &mut Settings,
    cmd: Option<ConfigCommands>,
) -> FinanceResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            println!("Finance Tracker Configuration");
            println!("=============================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Exports directory: {}", paths.exports_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  currency_symbol:   {}", settings.currency_symbol);
            println!("  date_format:       {}", settings.date_format);
            println!("  breakdown_limit:   {}", settings.breakdown_limit);
            println!("  strict_categories: {}", settings.strict_categories);
        }
        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }
    Ok(())
}
