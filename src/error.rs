//! Custom error types for the expense ledger
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::ValidationError;

/// The main error type for expense ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A candidate expense was rejected by field validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The CSV header lacks one or more required columns
    #[error("CSV must contain description, amount, category, and date columns (missing: {})", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The CSV text could not be read as records at all
    #[error("Import error: {0}")]
    Import(String),

    /// A ledger file holds rows that would be lost if it were rewritten
    #[error(
        "{path} has invalid rows on line(s) {}; fix them or rerun with --force to drop them",
        .lines.iter().map(u64::to_string).collect::<Vec<_>>().join(", ")
    )]
    InvalidRows { path: String, lines: Vec<u64> },

    /// Export was requested for an empty collection
    #[error("No expenses to export")]
    EmptyExport,

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error means there was nothing to export
    pub fn is_empty_export(&self) -> bool {
        matches!(self, Self::EmptyExport)
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for expense ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
