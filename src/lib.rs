//! Expense Ledger - record expenses, summarize spending, and track a budget
//!
//! This library provides the core of a personal expense tracker: validated
//! expense records, a CSV interchange codec, spending aggregation by category
//! and by month, and evaluation of total spending against a single budget.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (expenses, money, categories, budget)
//! - `services`: CSV import and the in-memory expense ledger
//! - `export`: CSV and JSON writers
//! - `reports`: Category and monthly aggregation, budget overview
//! - `display`: Terminal formatting helpers
//! - `config`: Configuration and path management
//! - `storage`: File access used by the command-line front end
//! - `cli`: Command handlers for the `expenses` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use expense_ledger::models::{BudgetStatus, ExpenseDraft};
//! use expense_ledger::reports::by_category;
//! use expense_ledger::ExpenseLedger;
//!
//! let mut ledger = ExpenseLedger::with_sample_data();
//! ledger.add(&ExpenseDraft::new("Bus", "2.75", "Transport", "2024-07-09"))?;
//!
//! let totals = by_category(ledger.expenses());
//! assert_eq!(totals[0].category.name(), "Food");
//! assert_eq!(ledger.evaluate_budget().status, BudgetStatus::Under);
//! # Ok::<(), expense_ledger::LedgerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use services::ExpenseLedger;
