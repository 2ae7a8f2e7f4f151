//! Expense display formatting
//!
//! Renders expenses as a table for `list` and as a one-line summary after an
//! add or delete.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::{Category, Expense};

/// Longest description shown in the table before truncation
const DESCRIPTION_WIDTH: usize = 32;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: Category,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table
///
/// Each entry pairs an expense with its zero-based ledger position; the `#`
/// column shows it one-based.
pub fn format_expense_table(entries: &[(usize, &Expense)], currency_symbol: &str) -> String {
    if entries.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = entries.iter().map(|(idx, expense)| ExpenseRow {
        row: idx + 1,
        date: expense.date().to_string(),
        description: truncate(expense.description(), DESCRIPTION_WIDTH),
        category: expense.category(),
        amount: expense.amount().format_with_symbol(currency_symbol),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format a single expense on one line
pub fn format_expense_line(expense: &Expense, currency_symbol: &str) -> String {
    format!(
        "{}  {}  {} ({})  {}",
        expense.id().short(),
        expense.date(),
        expense.description(),
        expense.category(),
        expense.amount().format_with_symbol(currency_symbol)
    )
}
