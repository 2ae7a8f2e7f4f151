//! Spending budget and utilization
//!
//! A budget is a single positive ceiling compared against total spending. It
//! never constrains which expenses may be recorded.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::{Money, MoneyParseError};

/// Utilization (in percent) above which spending counts as near the budget
pub const NEAR_THRESHOLD_PERCENT: f64 = 75.0;

/// Utilization (in percent) above which spending counts as over the budget
pub const OVER_THRESHOLD_PERCENT: f64 = 100.0;

/// The user's spend ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Budget(Money);

impl Budget {
    /// The ceiling used when nothing else is configured: $1000.00
    pub const DEFAULT: Budget = Budget(Money::from_cents(100_000));

    /// Create a budget, rejecting non-positive amounts
    pub fn new(amount: Money) -> Result<Self, BudgetError> {
        if amount.is_positive() {
            Ok(Self(amount))
        } else {
            Err(BudgetError::NotPositive(amount.to_decimal_string()))
        }
    }

    pub fn amount(&self) -> Money {
        self.0
    }

    /// Replace the budget with `value`
    ///
    /// Only finite, strictly positive values are accepted; a positive value
    /// below one cent becomes one cent. On rejection the previous budget is
    /// kept.
    pub fn set(&mut self, value: f64) -> Result<(), BudgetError> {
        let mut amount = Money::from_f64(value).ok_or(BudgetError::NotFinite)?;
        if value > 0.0 {
            amount = amount.max(Money::from_cents(1));
        }
        *self = Self::new(amount)?;
        Ok(())
    }

    /// Replace the budget from user-typed text, with the same retain-on-error rule
    pub fn set_from_str(&mut self, text: &str) -> Result<(), BudgetError> {
        let amount = Money::parse_positive(text).map_err(|e| match e {
            MoneyParseError::NotPositive(value) => BudgetError::NotPositive(value),
            MoneyParseError::InvalidFormat(value) => BudgetError::Unparseable(value),
        })?;
        *self = Self::new(amount)?;
        Ok(())
    }

    /// Evaluate `total` spending against this budget
    pub fn evaluate(&self, total: Money) -> BudgetEvaluation {
        BudgetEvaluation::evaluate(total, self.0)
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Why a candidate budget was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BudgetError {
    #[error("Budget must be a finite number")]
    NotFinite,

    #[error("Budget must be greater than zero (got {0})")]
    NotPositive(String),

    #[error("Budget is not a valid amount: {0:?}")]
    Unparseable(String),
}

/// Presentation severity of budget utilization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// At or below 75% of the budget
    Under,
    /// Above 75% up to and including 100%
    Near,
    /// Above 100%
    Over,
}

impl BudgetStatus {
    /// Classify a utilization percentage
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > OVER_THRESHOLD_PERCENT {
            Self::Over
        } else if percentage > NEAR_THRESHOLD_PERCENT {
            Self::Near
        } else {
            Self::Under
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Under => write!(f, "Under budget"),
            Self::Near => write!(f, "Near budget"),
            Self::Over => write!(f, "Over budget"),
        }
    }
}

/// Utilization of a budget by a spending total
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetEvaluation {
    /// `total / budget * 100`, or 0 when the budget is not positive
    pub percentage: f64,
    /// `budget - total`; negative once the budget is exceeded
    pub remaining: Money,
    pub status: BudgetStatus,
}

impl BudgetEvaluation {
    /// Evaluate `total` against `budget`
    ///
    /// A non-positive budget degenerates to 0% utilization instead of failing.
    pub fn evaluate(total: Money, budget: Money) -> Self {
        let percentage = if budget.is_positive() {
            (total.cents() as f64 / budget.cents() as f64) * 100.0
        } else {
            0.0
        };

        Self {
            percentage,
            remaining: budget - total,
            status: BudgetStatus::from_percentage(percentage),
        }
    }

    /// The amount by which the budget was exceeded, only when over budget
    pub fn exceeded_by(&self) -> Option<Money> {
        match self.status {
            BudgetStatus::Over => Some(self.remaining.abs()),
            _ => None,
        }
    }
}
