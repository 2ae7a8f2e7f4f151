//! CLI command handler for data export

use clap::ValueEnum;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export::json;
use crate::storage::write_text_atomic;

use super::load_ledger;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV interchange format (importable)
    Csv,
    /// JSON snapshot with report totals
    Json,
}

/// Handle the export command
pub fn handle_export_command(
    file: &Path,
    output: Option<PathBuf>,
    format: ExportFormat,
    pretty: bool,
    settings: &Settings,
) -> LedgerResult<()> {
    let ledger = load_ledger(file, settings.budget())?;

    let output = output.unwrap_or_else(|| {
        let default = PathBuf::from(&settings.export_file_name);
        match format {
            ExportFormat::Csv => default,
            ExportFormat::Json => default.with_extension("json"),
        }
    });

    match format {
        ExportFormat::Csv => {
            let csv = match ledger.export_csv() {
                Ok(csv) => csv,
                Err(LedgerError::EmptyExport) => {
                    println!("No expenses to export.");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };
            write_text_atomic(&output, &csv)?;
        }
        ExportFormat::Json => {
            let file = File::create(&output).map_err(|e| {
                LedgerError::Export(format!(
                    "Failed to create file {}: {}",
                    output.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);
            json::export_summary_json(ledger.expenses(), &ledger.budget(), &mut writer, pretty)?;
            writer
                .flush()
                .map_err(|e| LedgerError::Export(e.to_string()))?;
        }
    }

    println!(
        "Exported {} expenses to: {}",
        ledger.len(),
        output.display()
    );

    Ok(())
}
