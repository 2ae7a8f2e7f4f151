//! Expense ledger service
//!
//! Owns the live expense collection and the spending budget. Expenses are kept
//! newest first: additions and imports are placed ahead of what is already
//! there.

use crate::error::{LedgerError, LedgerResult};
use crate::export::csv::encode;
use crate::models::{
    Budget, BudgetError, BudgetEvaluation, Category, Expense, ExpenseDraft, ExpenseId, Money,
};
use crate::reports::spending::total;

use super::import::{decode_detailed, ImportResult};

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Filter by category
    pub category: Option<Category>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The in-memory expense collection and its budget
#[derive(Debug, Clone, Default)]
pub struct ExpenseLedger {
    expenses: Vec<Expense>,
    budget: Budget,
}

impl ExpenseLedger {
    /// Create an empty ledger
    pub fn new(budget: Budget) -> Self {
        Self {
            expenses: Vec::new(),
            budget,
        }
    }

    /// A ledger preloaded with a small demonstration data set
    pub fn with_sample_data() -> Self {
        let expenses = sample_drafts()
            .iter()
            .filter_map(|draft| draft.validate().ok())
            .collect();

        Self {
            expenses,
            budget: Budget::default(),
        }
    }

    /// Build a ledger from already-validated expenses, kept in the given order
    pub fn from_expenses(expenses: Vec<Expense>, budget: Budget) -> Self {
        Self { expenses, budget }
    }

    /// All expenses, newest first
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Expenses matching a filter, with their positions in the ledger
    pub fn list(&self, filter: &ExpenseFilter) -> Vec<(usize, &Expense)> {
        let matching = self
            .expenses
            .iter()
            .enumerate()
            .filter(|(_, e)| filter.category.map_or(true, |c| e.category() == c));

        match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Validate a draft and record it as the newest expense
    pub fn add(&mut self, draft: &ExpenseDraft) -> LedgerResult<&Expense> {
        let expense = draft.validate()?;
        tracing::info!(id = %expense.id(), amount = %expense.amount(), "Added expense");
        self.expenses.insert(0, expense);
        Ok(&self.expenses[0])
    }

    /// Remove an expense by id
    pub fn delete(&mut self, id: ExpenseId) -> LedgerResult<Expense> {
        let idx = self
            .expenses
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;

        let removed = self.expenses.remove(idx);
        tracing::info!(id = %id, "Deleted expense");
        Ok(removed)
    }

    /// Place a batch of expenses ahead of the existing ones, keeping batch order
    pub fn import(&mut self, mut batch: Vec<Expense>) {
        let count = batch.len();
        batch.append(&mut self.expenses);
        self.expenses = batch;
        tracing::info!(count, total = self.expenses.len(), "Imported expenses");
    }

    /// Decode CSV text and import the accepted rows
    ///
    /// A header missing required columns fails before anything is imported.
    pub fn import_csv(&mut self, text: &str) -> LedgerResult<ImportResult> {
        let result = decode_detailed(text)?;
        self.import(result.expenses.clone());
        Ok(result)
    }

    /// Encode the current collection as CSV
    pub fn export_csv(&self) -> LedgerResult<String> {
        encode(&self.expenses)
    }

    /// Total of all expense amounts
    pub fn total(&self) -> Money {
        total(&self.expenses)
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    /// Replace the budget; an invalid value leaves the current one in place
    pub fn set_budget(&mut self, value: f64) -> Result<(), BudgetError> {
        self.budget.set(value).inspect_err(|e| {
            tracing::warn!(value, error = %e, "Rejected budget");
        })
    }

    /// Evaluate total spending against the budget
    pub fn evaluate_budget(&self) -> BudgetEvaluation {
        self.budget.evaluate(self.total())
    }
}

fn sample_drafts() -> [ExpenseDraft; 7] {
    [
        ExpenseDraft::new("Groceries", "75.50", "Food", "2024-07-01"),
        ExpenseDraft::new("Gas", "40.00", "Transport", "2024-07-03"),
        ExpenseDraft::new("Movie Tickets", "30.00", "Entertainment", "2024-07-05"),
        ExpenseDraft::new("T-shirt", "25.00", "Shopping", "2024-07-06"),
        ExpenseDraft::new("Internet Bill", "60.00", "Bills", "2024-06-10"),
        ExpenseDraft::new("Dinner Out", "120.00", "Food", "2024-06-15"),
        ExpenseDraft::new("Train pass", "85.00", "Transport", "2024-06-20"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetStatus, ValidationError};

    fn draft(description: &str, amount: &str) -> ExpenseDraft {
        ExpenseDraft::new(description, amount, "Food", "2024-07-10")
    }

    #[test]
    fn test_sample_data() {
        let ledger = ExpenseLedger::with_sample_data();
        assert_eq!(ledger.len(), 7);
        assert_eq!(ledger.total(), Money::from_cents(43_550));
        assert_eq!(ledger.expenses()[0].description(), "Groceries");
        assert_eq!(ledger.budget(), Budget::DEFAULT);
    }

    #[test]
    fn test_add_prepends() {
        let mut ledger = ExpenseLedger::new(Budget::default());
        ledger.add(&draft("First", "1")).unwrap();
        let id = ledger.add(&draft("Second", "2")).unwrap().id();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.expenses()[0].id(), id);
        assert_eq!(ledger.expenses()[1].description(), "First");
    }

    #[test]
    fn test_add_invalid_leaves_ledger_unchanged() {
        let mut ledger = ExpenseLedger::with_sample_data();
        let err = ledger.add(&draft("Refund", "-3")).unwrap_err();

        assert!(err.is_validation());
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::InvalidAmount(_))
        ));
        assert_eq!(ledger.len(), 7);
    }

    #[test]
    fn test_delete() {
        let mut ledger = ExpenseLedger::with_sample_data();
        let id = ledger.expenses()[2].id();

        let removed = ledger.delete(id).unwrap();
        assert_eq!(removed.description(), "Movie Tickets");
        assert_eq!(ledger.len(), 6);
        assert!(ledger.get(id).is_none());

        assert!(ledger.delete(id).unwrap_err().is_not_found());
        assert_eq!(ledger.len(), 6);
    }

    #[test]
    fn test_import_prepends_batch_in_order() {
        let mut ledger = ExpenseLedger::new(Budget::default());
        ledger.add(&draft("Existing", "1")).unwrap();

        let batch = vec![
            draft("A", "1").validate().unwrap(),
            draft("B", "1").validate().unwrap(),
        ];
        ledger.import(batch);

        let names: Vec<_> = ledger.expenses().iter().map(|e| e.description()).collect();
        assert_eq!(names, ["A", "B", "Existing"]);
    }

    #[test]
    fn test_import_csv() {
        let mut ledger = ExpenseLedger::with_sample_data();
        let csv = "description,amount,category,date\nBus,2.75,Transport,2024-07-09\nBad,0,Food,2024-07-09\n";

        let result = ledger.import_csv(csv).unwrap();
        assert_eq!(result.imported(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(ledger.len(), 8);
        assert_eq!(ledger.expenses()[0].description(), "Bus");
    }

    #[test]
    fn test_import_csv_missing_columns_leaves_ledger_untouched() {
        let mut ledger = ExpenseLedger::with_sample_data();
        let err = ledger
            .import_csv("description,amount\nBus,2.75\n")
            .unwrap_err();

        assert!(matches!(err, LedgerError::MissingColumns(_)));
        assert_eq!(ledger.len(), 7);
    }

    #[test]
    fn test_export_csv() {
        let ledger = ExpenseLedger::with_sample_data();
        let csv = ledger.export_csv().unwrap();
        assert_eq!(csv.lines().count(), 8);

        let empty = ExpenseLedger::new(Budget::default());
        assert!(empty.export_csv().unwrap_err().is_empty_export());
    }

    #[test]
    fn test_filter() {
        let ledger = ExpenseLedger::with_sample_data();

        let food = ledger.list(&ExpenseFilter::new().category(Category::Food));
        let positions: Vec<_> = food.iter().map(|(idx, _)| *idx).collect();
        assert_eq!(positions, [0, 5]);

        let limited = ledger.list(&ExpenseFilter::new().limit(3));
        assert_eq!(limited.len(), 3);

        assert_eq!(ledger.list(&ExpenseFilter::new()).len(), 7);
    }

    #[test]
    fn test_budget() {
        let mut ledger = ExpenseLedger::with_sample_data();
        assert_eq!(ledger.evaluate_budget().status, BudgetStatus::Under);

        ledger.set_budget(400.0).unwrap();
        let eval = ledger.evaluate_budget();
        assert_eq!(eval.status, BudgetStatus::Over);
        assert_eq!(eval.exceeded_by(), Some(Money::from_cents(3_550)));

        assert!(ledger.set_budget(-1.0).is_err());
        assert_eq!(ledger.budget().amount(), Money::from_cents(40_000));
    }
}
