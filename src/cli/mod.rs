//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the clap
//! argument parsing with the ledger service. Every command works on a CSV
//! file: it is decoded into a ledger, changed, and encoded back.

pub mod expense;
pub mod export;
pub mod import;
pub mod report;

pub use expense::{
    handle_add_command, handle_delete_command, handle_list_command, handle_sample_command,
};
pub use export::{handle_export_command, ExportFormat};
pub use import::handle_import_command;
pub use report::{handle_report_command, ReportCommands};

use std::path::Path;

use crate::error::{LedgerError, LedgerResult};
use crate::export::csv::EXPORT_HEADER;
use crate::models::Budget;
use crate::services::{decode_detailed, ExpenseLedger, SkippedRow};
use crate::storage::{read_text, write_text_atomic};

/// Load a ledger from a CSV file for reading
///
/// A missing or blank file gives an empty ledger. Invalid rows are left out
/// and logged.
pub fn load_ledger(path: &Path, budget: Budget) -> LedgerResult<ExpenseLedger> {
    read_ledger(path, budget).map(|(ledger, _)| ledger)
}

/// Load a ledger that is about to be written back
///
/// Saving would drop any row that failed validation, so invalid rows are an
/// error unless `force` is set. With `force` the dropped rows are listed.
pub fn load_ledger_for_update(
    path: &Path,
    budget: Budget,
    force: bool,
) -> LedgerResult<ExpenseLedger> {
    let (ledger, skipped) = read_ledger(path, budget)?;
    if skipped.is_empty() {
        return Ok(ledger);
    }

    if !force {
        return Err(LedgerError::InvalidRows {
            path: path.display().to_string(),
            lines: skipped.iter().map(|row| row.line).collect(),
        });
    }

    println!(
        "Dropping {} invalid row(s) from {}:",
        skipped.len(),
        path.display()
    );
    for row in &skipped {
        println!("    Line {}: {}", row.line, row.error);
    }

    Ok(ledger)
}

fn read_ledger(path: &Path, budget: Budget) -> LedgerResult<(ExpenseLedger, Vec<SkippedRow>)> {
    let text = match read_text(path)? {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Ok((ExpenseLedger::new(budget), Vec::new())),
    };

    let result = decode_detailed(&text)?;
    tracing::debug!(
        file = %path.display(),
        loaded = result.imported(),
        skipped = result.skipped.len(),
        "Loaded ledger"
    );

    Ok((
        ExpenseLedger::from_expenses(result.expenses, budget),
        result.skipped,
    ))
}

/// Write a ledger back to a CSV file
///
/// An empty ledger is written as a header line alone so the file stays
/// importable.
pub fn save_ledger(path: &Path, ledger: &ExpenseLedger) -> LedgerResult<()> {
    let text = match ledger.export_csv() {
        Ok(text) => text,
        Err(LedgerError::EmptyExport) => format!("{}\n", EXPORT_HEADER),
        Err(e) => return Err(e),
    };
    write_text_atomic(path, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseDraft;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let ledger = load_ledger(&temp_dir.path().join("none.csv"), Budget::default()).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.csv");

        let mut ledger = ExpenseLedger::with_sample_data();
        ledger
            .add(&ExpenseDraft::new("Bus", "2.75", "Transport", "2024-07-09"))
            .unwrap();
        save_ledger(&path, &ledger).unwrap();

        let loaded = load_ledger(&path, Budget::default()).unwrap();
        assert_eq!(loaded.len(), 8);
        assert_eq!(loaded.total(), ledger.total());
        assert_eq!(loaded.expenses()[0].description(), "Bus");
    }

    #[test]
    fn test_empty_ledger_saves_header_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.csv");

        save_ledger(&path, &ExpenseLedger::default()).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "id,description,amount,category,date\n"
        );
        assert!(load_ledger(&path, Budget::default()).unwrap().is_empty());
    }

    #[test]
    fn test_update_refuses_file_with_invalid_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("edited.csv");
        std::fs::write(
            &path,
            "description,amount,category,date\nBus,2.75,Transport,2024-07-09\nTypo,abc,Food,2024-07-10\n",
        )
        .unwrap();

        assert_eq!(load_ledger(&path, Budget::default()).unwrap().len(), 1);

        let err = load_ledger_for_update(&path, Budget::default(), false).unwrap_err();
        assert!(matches!(&err, LedgerError::InvalidRows { lines, .. } if lines == &[3]));

        let forced = load_ledger_for_update(&path, Budget::default(), true).unwrap();
        assert_eq!(forced.len(), 1);
    }

    #[test]
    fn test_update_of_clean_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.csv");
        save_ledger(&path, &ExpenseLedger::with_sample_data()).unwrap();

        let ledger = load_ledger_for_update(&path, Budget::default(), false).unwrap();
        assert_eq!(ledger.len(), 7);
    }

    #[test]
    fn test_file_without_header_columns_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.csv");
        std::fs::write(&path, "name,cost\nBus,2\n").unwrap();

        let err = load_ledger(&path, Budget::default()).unwrap_err();
        assert!(matches!(err, LedgerError::MissingColumns(_)));
    }
}
