//! CLI command handler for CSV import
//!
//! Merges the valid rows of a CSV file into a ledger file, ahead of the
//! expenses already there.

use std::path::Path;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::read_text;

use super::{load_ledger_for_update, save_ledger};

/// Handle the import command
pub fn handle_import_command(
    source: &Path,
    into: &Path,
    force: bool,
    settings: &Settings,
) -> LedgerResult<()> {
    let content = read_text(source)?
        .ok_or_else(|| LedgerError::Import(format!("File not found: {}", source.display())))?;

    let mut ledger = load_ledger_for_update(into, settings.budget(), force)?;
    let result = ledger.import_csv(&content)?;

    if result.imported() > 0 || force {
        save_ledger(into, &ledger)?;
    }

    println!("Import Complete!");
    println!("  Imported:    {}", result.imported());
    println!("  Skipped:     {}", result.skipped.len());
    for skipped in &result.skipped {
        println!("    Line {}: {}", skipped.line, skipped.error);
    }
    if result.coerced_categories > 0 {
        println!(
            "  Unknown categories recorded as Other: {}",
            result.coerced_categories
        );
    }
    println!(
        "  Total:       {} expenses, {}",
        ledger.len(),
        ledger.total().format_with_symbol(&settings.currency_symbol)
    );

    Ok(())
}
