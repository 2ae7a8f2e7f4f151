//! Core data models for the expense ledger
//!
//! This module contains the data structures of the expense domain: expenses
//! and their drafts, categories, money amounts, identifiers, and budgets.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use budget::{Budget, BudgetError, BudgetEvaluation, BudgetStatus};
pub use category::{Category, UnknownCategory};
pub use expense::{Expense, ExpenseDraft, Field, ValidationError};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
