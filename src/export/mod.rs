//! Export module
//!
//! - CSV: the expense interchange format, readable by the importer
//! - JSON: a versioned snapshot of expenses with their report views

pub mod csv;
pub mod json;

pub use csv::{encode, export_expenses_csv, EXPORT_HEADER};
pub use json::{export_summary_json, SummaryExport, EXPORT_SCHEMA_VERSION};
