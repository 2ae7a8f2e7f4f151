//! Service layer
//!
//! Business logic on top of the models: CSV import and the in-memory ledger
//! that owns the expense collection and the budget.

pub mod import;
pub mod ledger;

pub use import::{decode, decode_detailed, ColumnMapping, ImportResult, SkippedRow};
pub use ledger::{ExpenseFilter, ExpenseLedger};
