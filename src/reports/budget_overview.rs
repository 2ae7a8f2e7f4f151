//! Budget Overview Report
//!
//! Compares total spending against the configured budget and renders the
//! spent/remaining summary with a progress bar.

use serde::Serialize;
use std::io::Write;

use crate::display::report::{format_bar, format_percentage, separator};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, BudgetEvaluation, BudgetStatus, Expense, Money};

use super::spending::total;

/// Width of the utilization bar in characters
const BAR_WIDTH: usize = 30;

/// Budget Overview Report
#[derive(Debug, Clone, Serialize)]
pub struct BudgetOverviewReport {
    /// The spend ceiling
    pub budget: Money,
    /// Total of all expenses
    pub spent: Money,
    #[serde(flatten)]
    pub evaluation: BudgetEvaluation,
}

impl BudgetOverviewReport {
    /// Generate a budget overview over all expenses
    pub fn generate(expenses: &[Expense], budget: &Budget) -> Self {
        let spent = total(expenses);
        Self {
            budget: budget.amount(),
            spent,
            evaluation: budget.evaluate(spent),
        }
    }

    pub fn status(&self) -> BudgetStatus {
        self.evaluation.status
    }

    /// Remaining amount, shown as `-$x.xx` once the budget is exceeded
    pub fn remaining_display(&self, currency_symbol: &str) -> String {
        self.evaluation.remaining.format_with_symbol(currency_symbol)
    }

    /// Bar fill, capped at 100% even when spending exceeds the budget
    pub fn bar(&self) -> String {
        format_bar(self.evaluation.percentage.min(100.0), 100.0, BAR_WIDTH)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |amount: Money| amount.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str("Budget Overview\n");
        output.push_str(&separator(50));
        output.push('\n');
        output.push_str(&format!("{:<12} {:>14}\n", "Budget:", money(self.budget)));
        output.push_str(&format!("{:<12} {:>14}\n", "Spent:", money(self.spent)));
        output.push_str(&format!(
            "{:<12} {:>14}\n",
            "Remaining:",
            self.remaining_display(currency_symbol)
        ));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            self.bar(),
            format_percentage(self.evaluation.percentage)
        ));
        output.push_str(&format!("Status: {}\n", self.status()));

        if let Some(excess) = self.evaluation.exceeded_by() {
            output.push_str(&format!(
                "\nYou have exceeded your budget by {}!\n",
                money(excess)
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> LedgerResult<()> {
        writeln!(writer, "Budget,Spent,Remaining,Percentage,Status")
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        writeln!(
            writer,
            "{},{},{},{:.2},{}",
            self.budget.to_decimal_string(),
            self.spent.to_decimal_string(),
            self.evaluation.remaining.to_decimal_string(),
            self.evaluation.percentage,
            self.status()
        )
        .map_err(|e| LedgerError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseDraft;

    fn expenses(amounts: &[&str]) -> Vec<Expense> {
        amounts
            .iter()
            .map(|a| {
                ExpenseDraft::new("Item", *a, "Food", "2024-07-01")
                    .validate()
                    .unwrap()
            })
            .collect()
    }

    fn budget(dollars: i64) -> Budget {
        Budget::new(Money::from_dollars_cents(dollars, 0)).unwrap()
    }

    #[test]
    fn test_under_budget() {
        let report = BudgetOverviewReport::generate(&expenses(&["100", "50"]), &budget(1000));
        assert_eq!(report.spent, Money::from_cents(15_000));
        assert_eq!(report.status(), BudgetStatus::Under);
        assert_eq!(report.remaining_display("$"), "$850.00");

        let text = report.format_terminal("$");
        assert!(text.contains("Under budget"));
        assert!(!text.contains("exceeded"));
    }

    #[test]
    fn test_over_budget() {
        let report = BudgetOverviewReport::generate(&expenses(&["700", "500"]), &budget(1000));
        assert_eq!(report.evaluation.percentage, 120.0);
        assert_eq!(report.status(), BudgetStatus::Over);
        assert_eq!(report.remaining_display("$"), "-$200.00");

        let text = report.format_terminal("$");
        assert!(text.contains("You have exceeded your budget by $200.00!"));
        assert!(text.contains("120%"));
    }

    #[test]
    fn test_currency_symbol() {
        let report = BudgetOverviewReport::generate(&expenses(&["1200"]), &budget(1000));
        assert_eq!(report.remaining_display("€"), "-€200.00");

        let text = report.format_terminal("€");
        assert!(text.contains("€1000.00"));
        assert!(text.contains("You have exceeded your budget by €200.00!"));
        assert!(!text.contains('$'));
    }

    #[test]
    fn test_bar_is_capped() {
        let full = BudgetOverviewReport::generate(&expenses(&["1000"]), &budget(1000));
        let over = BudgetOverviewReport::generate(&expenses(&["5000"]), &budget(1000));
        assert_eq!(full.bar(), over.bar());
        assert_eq!(over.bar().chars().filter(|c| *c == '█').count(), BAR_WIDTH);
    }

    #[test]
    fn test_empty_ledger() {
        let report = BudgetOverviewReport::generate(&[], &Budget::default());
        assert_eq!(report.spent, Money::zero());
        assert_eq!(report.evaluation.percentage, 0.0);
        assert_eq!(report.remaining_display("$"), "$1000.00");
    }

    #[test]
    fn test_export_csv() {
        let report = BudgetOverviewReport::generate(&expenses(&["800"]), &budget(1000));
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(
            csv,
            "Budget,Spent,Remaining,Percentage,Status\n1000.00,800.00,200.00,80.00,Near budget\n"
        );
    }
}
