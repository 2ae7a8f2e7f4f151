//! Reports module
//!
//! Aggregations over a set of expenses: totals by category and by month, and
//! utilization of the spending budget.

pub mod budget_overview;
pub mod spending;

pub use budget_overview::BudgetOverviewReport;
pub use spending::{by_category, by_month, total, CategoryTotal, MonthBucket, MonthTotal, SpendingReport};
