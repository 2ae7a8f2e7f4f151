//! User settings
//!
//! Persisted as `config.json` in the configuration directory. Every field has
//! a default, so older or partial files still load.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::{Budget, BudgetError, Money};
use crate::storage::{read_json, write_json_atomic};

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Budget used when a report is not given one explicitly
    #[serde(default = "default_budget")]
    pub default_budget: Money,

    /// Currency symbol for terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// File name used by `export` when no output path is given
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_budget() -> Money {
    Budget::DEFAULT.amount()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_export_file_name() -> String {
    "expenses.csv".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_budget: default_budget(),
            currency_symbol: default_currency(),
            export_file_name: default_export_file_name(),
        }
    }
}

impl Settings {
    /// The configured budget
    ///
    /// A hand-edited non-positive value falls back to the default ceiling.
    pub fn budget(&self) -> Budget {
        Budget::new(self.default_budget).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring configured budget");
            Budget::DEFAULT
        })
    }

    /// Replace the configured budget, keeping the old one on rejection
    pub fn set_budget(&mut self, text: &str) -> Result<(), BudgetError> {
        let mut budget = self.budget();
        budget.set_from_str(text)?;
        self.default_budget = budget.amount();
        Ok(())
    }

    /// Load settings from disk, or default settings if the file doesn't exist
    ///
    /// Nothing is written; the caller decides when to persist.
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        read_json(paths.settings_file())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
