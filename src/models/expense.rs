//! Expense model and field validation
//!
//! An [`Expense`] can only be obtained by validating an [`ExpenseDraft`], so
//! every expense in a ledger satisfies the field rules: non-blank description
//! and date, strictly positive amount, and a category from the closed set.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;

/// A single recorded expense
///
/// Expenses are immutable once accepted. Identity is assigned on validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expense {
    id: ExpenseId,
    description: String,
    amount: Money,
    category: Category,
    date: String,
}

impl Expense {
    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The date as supplied, normally `YYYY-MM-DD`
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Parse the stored date text as a calendar date
    ///
    /// Returns `None` when the text is not a valid `YYYY-MM-DD` date. Such
    /// expenses are still valid; they are only excluded from month bucketing.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Compare the user-visible fields, ignoring identity
    pub fn same_entry(&self, other: &Expense) -> bool {
        self.description == other.description
            && self.amount == other.amount
            && self.category == other.category
            && self.date == other.date
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) {}",
            self.date, self.description, self.category, self.amount
        )
    }
}

/// A candidate expense as typed into a form or read from a CSV row
///
/// All fields are raw text; [`ExpenseDraft::validate`] applies the acceptance
/// rules and produces an [`Expense`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub date: String,
}

impl ExpenseDraft {
    /// Create a draft from raw field text
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
            date: date.into(),
        }
    }

    /// Validate the draft, assigning a fresh id on success
    ///
    /// Rules are checked in order and the first failure wins: description,
    /// amount, date. An unrecognized category is not a failure; it becomes
    /// [`Category::Other`].
    pub fn validate(&self) -> Result<Expense, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingField(Field::Description));
        }

        let amount = Money::parse_positive(&self.amount)
            .map_err(|_| ValidationError::InvalidAmount(self.amount.trim().to_string()))?;

        let date = self.date.trim();
        if date.is_empty() {
            return Err(ValidationError::MissingField(Field::Date));
        }

        let (category, coerced) = Category::resolve(&self.category);
        if coerced {
            tracing::warn!(
                category = self.category.trim(),
                "Invalid category found, defaulting to 'Other'"
            );
        }

        Ok(Expense {
            id: ExpenseId::new(),
            description: description.to_string(),
            amount,
            category,
            date: date.to_string(),
        })
    }
}

/// A required text field of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Description,
    Date,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Description => write!(f, "description"),
            Self::Date => write!(f, "date"),
        }
    }
}

/// Reasons a draft is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(Field),

    #[error("Please enter a valid positive amount (got {0:?})")]
    InvalidAmount(String),
}
