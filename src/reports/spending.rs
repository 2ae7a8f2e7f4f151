//! Spending Report
//!
//! Aggregates expenses by category and by calendar month. Every view is
//! recomputed from the slice it is given; nothing is cached between calls.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use crate::display::report::{format_bar, format_percentage, separator};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Expense, Money};

/// Spending total for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Money,
    /// Number of expenses in this category
    pub count: usize,
    /// Share of all spending
    pub percentage: f64,
}

/// Month bucket key
///
/// Dated buckets are keyed by the first day of their month so that ordering is
/// chronological. Expenses whose date text is not a calendar date share the
/// `Undated` bucket, which sorts after every month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MonthBucket {
    Month(NaiveDate),
    Undated,
}

impl MonthBucket {
    /// Bucket for an expense date
    pub fn of(expense: &Expense) -> Self {
        expense
            .calendar_date()
            .and_then(|date| date.with_day(1))
            .map_or(Self::Undated, Self::Month)
    }

    /// Short month and two-digit year, e.g. `Jul 24`
    pub fn label(&self) -> String {
        match self {
            Self::Month(first) => first.format("%b %y").to_string(),
            Self::Undated => "Undated".to_string(),
        }
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.label())
    }
}

/// Spending total for one month bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub bucket: MonthBucket,
    pub label: String,
    pub total: Money,
    pub count: usize,
}

/// Sum of all expense amounts
pub fn total(expenses: &[Expense]) -> Money {
    expenses.iter().map(Expense::amount).sum()
}

/// Category totals ordered by total, largest first
///
/// Categories without expenses are omitted. Equal totals keep the order in
/// which their categories first appear.
pub fn by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let grand_total = total(expenses);
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category()) {
            Some(entry) => {
                entry.total += expense.amount();
                entry.count += 1;
            }
            None => totals.push(CategoryTotal {
                category: expense.category(),
                total: expense.amount(),
                count: 1,
                percentage: 0.0,
            }),
        }
    }

    for entry in &mut totals {
        entry.percentage = share(entry.total, grand_total);
    }

    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Month totals in chronological order
pub fn by_month(expenses: &[Expense]) -> Vec<MonthTotal> {
    let mut buckets: BTreeMap<MonthBucket, (Money, usize)> = BTreeMap::new();

    for expense in expenses {
        let entry = buckets
            .entry(MonthBucket::of(expense))
            .or_insert((Money::zero(), 0));
        entry.0 += expense.amount();
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(bucket, (total, count))| MonthTotal {
            label: bucket.label(),
            bucket,
            total,
            count,
        })
        .collect()
}

fn share(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        (part.cents() as f64 / whole.cents() as f64) * 100.0
    }
}

/// Spending Report
#[derive(Debug, Clone, Serialize)]
pub struct SpendingReport {
    /// Spending by category, largest first
    pub categories: Vec<CategoryTotal>,
    /// Spending by month, oldest first
    pub months: Vec<MonthTotal>,
    /// Total spending across all expenses
    pub total_spending: Money,
    /// Total expense count
    pub expense_count: usize,
}

impl SpendingReport {
    /// Generate a spending report over all expenses
    pub fn generate(expenses: &[Expense]) -> Self {
        Self {
            categories: by_category(expenses),
            months: by_month(expenses),
            total_spending: total(expenses),
            expense_count: expenses.len(),
        }
    }

    /// Whether there is anything to chart
    pub fn is_empty(&self) -> bool {
        self.expense_count == 0
    }

    /// Get the top spending categories
    pub fn top_categories(&self, limit: usize) -> &[CategoryTotal] {
        &self.categories[..limit.min(self.categories.len())]
    }

    fn shown_categories(&self, top: Option<usize>) -> &[CategoryTotal] {
        match top {
            Some(limit) => self.top_categories(limit),
            None => &self.categories,
        }
    }

    /// Format the category section for terminal display
    pub fn format_categories(&self, top: Option<usize>, currency_symbol: &str) -> String {
        let mut output = String::new();
        output.push_str("Expenses by Category\n");
        output.push_str(&separator(60));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No data to display\n");
            return output;
        }

        let max = self
            .categories
            .first()
            .map(|c| c.total.as_f64())
            .unwrap_or_default();

        for entry in self.shown_categories(top) {
            output.push_str(&format!(
                "{:<15} {:>12} {:>6} {}\n",
                entry.category,
                entry.total.format_with_symbol(currency_symbol),
                format_percentage(entry.percentage),
                format_bar(entry.total.as_f64(), max, 20)
            ));
        }
        output
    }

    /// Format the monthly section for terminal display
    pub fn format_months(&self, currency_symbol: &str) -> String {
        let mut output = String::new();
        output.push_str("Monthly Spending\n");
        output.push_str(&separator(60));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No data to display\n");
            return output;
        }

        let max = self
            .months
            .iter()
            .map(|m| m.total)
            .max()
            .unwrap_or_default()
            .as_f64();

        for entry in &self.months {
            output.push_str(&format!(
                "{:<8} {:>12} {:>5} {}\n",
                entry.label,
                entry.total.format_with_symbol(currency_symbol),
                entry.count,
                format_bar(entry.total.as_f64(), max, 25)
            ));
        }
        output
    }

    /// Format the full report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Total Spending: {}\n",
            self.total_spending.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!("Total Expenses: {}\n\n", self.expense_count));
        output.push_str(&self.format_categories(None, currency_symbol));
        output.push('\n');
        output.push_str(&self.format_months(currency_symbol));
        output
    }

    /// Export the category rows to CSV, optionally only the top `top`
    pub fn export_categories_csv<W: Write>(
        &self,
        writer: &mut W,
        top: Option<usize>,
    ) -> LedgerResult<()> {
        writeln!(writer, "Category,Amount,Count,Percentage")
            .map_err(|e| LedgerError::Export(e.to_string()))?;

        for entry in self.shown_categories(top) {
            writeln!(
                writer,
                "{},{},{},{:.2}",
                entry.category,
                entry.total.to_decimal_string(),
                entry.count,
                entry.percentage
            )
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        }

        Ok(())
    }

    /// Export the month rows to CSV
    pub fn export_months_csv<W: Write>(&self, writer: &mut W) -> LedgerResult<()> {
        writeln!(writer, "Month,Amount,Count,Percentage")
            .map_err(|e| LedgerError::Export(e.to_string()))?;

        for entry in &self.months {
            writeln!(
                writer,
                "{},{},{},{:.2}",
                entry.label,
                entry.total.to_decimal_string(),
                entry.count,
                share(entry.total, self.total_spending)
            )
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        }

        Ok(())
    }
}
