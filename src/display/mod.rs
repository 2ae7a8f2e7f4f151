//! Display formatting for terminal output
//!
//! Tables and helpers shared by the report renderers.

pub mod expense;
pub mod report;

pub use expense::{format_expense_line, format_expense_table};
