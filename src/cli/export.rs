//! Export and import CLI commands

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::resolve_period;
use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::export::{ExportData, ExportFormat};
use crate::services::{read_import_file, summarize};
use crate::storage::Storage;

/// `finance export <csv|json|md> [--period] [--output PATH]`
///
/// Without `--output` the file lands in the exports directory under its
/// default name. `--output -` writes to stdout.
pub fn handle_export_command(
    storage: &Storage,
    format: ExportFormat,
    period: Option<String>,
    output: Option<PathBuf>,
) -> FinanceResult<()> {
    let period = resolve_period(storage, period.as_deref())?;
    let transactions = storage.load_state().transactions;
    let data: ExportData = summarize(&transactions, &[], period).into();

    match output {
        Some(path) if path.as_os_str() == "-" => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            format.write(&data, &mut handle)?;
            handle.flush()?;
        }
        other => {
            let path = match other {
                Some(path) => path,
                None => {
                    let dir = storage.paths().exports_dir();
                    std::fs::create_dir_all(&dir).map_err(|e| {
                        FinanceError::Export(format!("Failed to create {}: {}", dir.display(), e))
                    })?;
                    dir.join(format.file_name(period))
                }
            };

            let file = File::create(&path).map_err(|e| {
                FinanceError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            format.write(&data, &mut writer)?;
            writer.flush()?;

            println!(
                "Exported {} transaction(s) for {} to {}",
                data.transactions.len(),
                period,
                path.display()
            );
        }
    }

    Ok(())
}

/// `finance import <file.json>`
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    file: PathBuf,
) -> FinanceResult<()> {
    let batch = read_import_file(&file)?;
    let mut ledger = storage.open_ledger(settings.strict_categories);
    let summary = ledger.import(batch)?;

    println!(
        "Imported {} new and {} updated transaction(s) from {}",
        summary.added,
        summary.replaced,
        file.display()
    );
    Ok(())
}
