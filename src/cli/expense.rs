//! CLI command handlers for recording and browsing expenses

use std::path::Path;

use crate::config::Settings;
use crate::display::{format_expense_line, format_expense_table};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, ExpenseDraft};
use crate::services::{ExpenseFilter, ExpenseLedger};
use crate::storage::write_text_atomic;

use super::{load_ledger, load_ledger_for_update, save_ledger};

/// Handle the add command
pub fn handle_add_command(
    file: &Path,
    draft: &ExpenseDraft,
    force: bool,
    settings: &Settings,
) -> LedgerResult<()> {
    let mut ledger = load_ledger_for_update(file, settings.budget(), force)?;

    let line = format_expense_line(ledger.add(draft)?, &settings.currency_symbol);
    save_ledger(file, &ledger)?;

    println!("Added: {}", line);
    println!(
        "Total spending: {}",
        ledger.total().format_with_symbol(&settings.currency_symbol)
    );

    Ok(())
}

/// Handle the list command
pub fn handle_list_command(
    file: &Path,
    category: Option<Category>,
    limit: Option<usize>,
    settings: &Settings,
) -> LedgerResult<()> {
    let ledger = load_ledger(file, settings.budget())?;

    let filter = ExpenseFilter {
        category,
        limit,
    };
    let entries = ledger.list(&filter);

    print!("{}", format_expense_table(&entries, &settings.currency_symbol));
    if !entries.is_empty() {
        println!(
            "Showing {} of {} expenses. Total spending: {}",
            entries.len(),
            ledger.len(),
            ledger.total().format_with_symbol(&settings.currency_symbol)
        );
    }

    Ok(())
}

/// Handle the delete command
///
/// `row` is the one-based position shown by `list`.
pub fn handle_delete_command(
    file: &Path,
    row: usize,
    force: bool,
    settings: &Settings,
) -> LedgerResult<()> {
    let mut ledger = load_ledger_for_update(file, settings.budget(), force)?;

    let id = row
        .checked_sub(1)
        .and_then(|idx| ledger.expenses().get(idx))
        .map(|expense| expense.id())
        .ok_or_else(|| LedgerError::expense_not_found(format!("row {}", row)))?;

    let removed = ledger.delete(id)?;
    save_ledger(file, &ledger)?;

    println!(
        "Deleted: {}",
        format_expense_line(&removed, &settings.currency_symbol)
    );

    Ok(())
}

/// Handle the sample command
///
/// Writes the demonstration data set to `output`, or to stdout without one.
pub fn handle_sample_command(output: Option<&Path>) -> LedgerResult<()> {
    let ledger = ExpenseLedger::with_sample_data();
    let csv = ledger.export_csv()?;

    match output {
        Some(path) => {
            write_text_atomic(path, &csv)?;
            println!(
                "Wrote {} sample expenses to: {}",
                ledger.len(),
                path.display()
            );
        }
        None => print!("{}", csv),
    }

    Ok(())
}
