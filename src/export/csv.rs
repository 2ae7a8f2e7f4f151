//! CSV Export functionality
//!
//! Writes expenses in the interchange column order
//! `id,description,amount,category,date`. Fields are joined with commas and
//! never quoted, so descriptions must not contain commas or line breaks.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Expense;

/// Header line written before the expense rows
pub const EXPORT_HEADER: &str = "id,description,amount,category,date";

/// Export expenses to a writer
///
/// Fails with [`LedgerError::EmptyExport`] before writing anything when there
/// are no expenses.
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: &mut W) -> LedgerResult<()> {
    if expenses.is_empty() {
        return Err(LedgerError::EmptyExport);
    }

    writeln!(writer, "{}", EXPORT_HEADER).map_err(|e| LedgerError::Export(e.to_string()))?;

    for expense in expenses {
        writeln!(
            writer,
            "{},{},{},{},{}",
            expense.id(),
            expense.description(),
            expense.amount().to_decimal_string(),
            expense.category(),
            expense.date()
        )
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    tracing::debug!(count = expenses.len(), "Encoded expenses as CSV");
    Ok(())
}

/// Encode expenses as CSV text
pub fn encode(expenses: &[Expense]) -> LedgerResult<String> {
    let mut buffer = Vec::new();
    export_expenses_csv(expenses, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| LedgerError::Export(e.to_string()))
}
