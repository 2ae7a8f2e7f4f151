//! JSON Export functionality
//!
//! Exports a ledger snapshot (expenses plus the derived report views) as a
//! versioned JSON document.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, Expense, Money};
use crate::reports::{by_category, by_month, BudgetOverviewReport, CategoryTotal, MonthTotal};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Ledger snapshot
#[derive(Debug, Clone, Serialize)]
pub struct SummaryExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub expenses: Vec<Expense>,

    pub total: Money,

    /// Spending by category, largest first
    pub categories: Vec<CategoryTotal>,

    /// Spending by month, oldest first
    pub months: Vec<MonthTotal>,

    pub budget: BudgetOverviewReport,
}

impl SummaryExport {
    /// Build a snapshot of `expenses` evaluated against `budget`
    pub fn new(expenses: &[Expense], budget: &Budget) -> Self {
        let overview = BudgetOverviewReport::generate(expenses, budget);
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses: expenses.to_vec(),
            total: overview.spent,
            categories: by_category(expenses),
            months: by_month(expenses),
            budget: overview,
        }
    }
}

/// Export a ledger snapshot to JSON
pub fn export_summary_json<W: Write>(
    expenses: &[Expense],
    budget: &Budget,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    let export = SummaryExport::new(expenses, budget);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseDraft;
    use serde_json::Value;

    fn expenses() -> Vec<Expense> {
        vec![
            ExpenseDraft::new("Groceries", "75.50", "Food", "2024-07-01")
                .validate()
                .unwrap(),
            ExpenseDraft::new("Internet Bill", "60", "Bills", "2024-06-10")
                .validate()
                .unwrap(),
        ]
    }

    #[test]
    fn test_summary_export() {
        let export = SummaryExport::new(&expenses(), &Budget::default());
        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.total, Money::from_cents(13_550));
        assert_eq!(export.categories.len(), 2);
        assert_eq!(export.months.len(), 2);
    }

    #[test]
    fn test_json_shape() {
        let mut output = Vec::new();
        export_summary_json(&expenses(), &Budget::default(), &mut output, true).unwrap();
        let json: Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(json["total"], 13_550);
        assert_eq!(json["expenses"][0]["description"], "Groceries");
        assert_eq!(json["expenses"][0]["category"], "Food");
        assert_eq!(json["categories"][0]["category"], "Food");
        assert_eq!(json["months"][0]["label"], "Jun 24");
        assert_eq!(json["budget"]["status"], "under");
        assert_eq!(json["budget"]["budget"], 100_000);
    }

    #[test]
    fn test_empty_ledger_exports() {
        let mut output = Vec::new();
        export_summary_json(&[], &Budget::default(), &mut output, false).unwrap();
        let json: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["expenses"].as_array().map(Vec::len), Some(0));
    }
}
