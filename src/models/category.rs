//! Spending categories
//!
//! Categories form a closed set. Text that names none of them is coerced to
//! [`Category::Other`] rather than rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A spending class used both as a tag and as an aggregation key
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Category {
    /// Preselected for new entries
    #[default]
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Health,
    Other,
}

impl Category {
    /// Get all categories in display order
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Transport,
            Self::Shopping,
            Self::Bills,
            Self::Entertainment,
            Self::Health,
            Self::Other,
        ]
    }

    /// Get the canonical name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Other => "Other",
        }
    }

    /// Resolve category text, falling back to `Other` for unknown values
    ///
    /// The returned flag is `true` when the fallback was applied.
    pub fn resolve(s: &str) -> (Self, bool) {
        match s.parse() {
            Ok(category) => (category, false),
            Err(_) => (Self::Other, true),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Exact match on the canonical name, ignoring surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Category text that names no member of the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);
