//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Arithmetic saturates at the ends of the i64 cent range instead of
//! overflowing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_ledger::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_decimal_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from dollars and cents
    pub const fn from_dollars_cents(dollars: i64, cents: i64) -> Self {
        Self(dollars * 100 + cents)
    }

    /// Convert a floating-point amount, rounding to the nearest cent
    ///
    /// Returns `None` for NaN, infinities, and values outside the i64 cent range.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents >= i64::MAX as f64 || cents <= i64::MIN as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Lossy conversion for ratio arithmetic
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "+10.50", "$10.50", "10", ".5",
    /// "1e3", "2.5E-1". Digits past the second decimal place round half-up to
    /// the nearest cent.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let input = s.trim();
        let parsed = parse_decimal(input)
            .ok_or_else(|| MoneyParseError::InvalidFormat(input.to_string()))?;
        Ok(Self(parsed.signed_cents()))
    }

    /// Parse an amount that must be strictly greater than zero
    ///
    /// A positive value too small to survive rounding becomes one cent rather
    /// than zero.
    pub fn parse_positive(s: &str) -> Result<Self, MoneyParseError> {
        let input = s.trim();
        match parse_decimal(input) {
            Some(parsed) if !parsed.negative && parsed.nonzero => Ok(Self(parsed.cents.max(1))),
            Some(_) => Err(MoneyParseError::NotPositive(input.to_string())),
            None => Err(MoneyParseError::InvalidFormat(input.to_string())),
        }
    }

    /// Plain decimal text with two fractional digits and no currency symbol
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Sign and magnitude of a parsed decimal, rounded to cents
struct ParsedDecimal {
    negative: bool,
    cents: i64,
    /// Whether any digit before rounding was non-zero
    nonzero: bool,
}

impl ParsedDecimal {
    fn signed_cents(&self) -> i64 {
        if self.negative {
            -self.cents
        } else {
            self.cents
        }
    }
}

fn parse_decimal(input: &str) -> Option<ParsedDecimal> {
    let (negative, rest) = match input.strip_prefix('-') {
        Some(stripped) => (true, stripped),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest);

    let (mantissa, exponent) = match rest.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => (&rest[..pos], parse_exponent(&rest[pos + 1..])?),
        None => (rest, 0),
    };

    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits: Vec<i64> = whole
        .bytes()
        .chain(frac.bytes())
        .map(|b| i64::from(b - b'0'))
        .collect();
    let len = digits.len() as i64;

    // Position of the first digit below one cent
    let cut = (whole.len() as i64)
        .saturating_add(exponent)
        .saturating_add(2);

    let mut cents: i64 = 0;
    for &digit in digits.iter().take(cut.clamp(0, len) as usize) {
        cents = cents.checked_mul(10)?.checked_add(digit)?;
    }
    if cents != 0 {
        for _ in len..cut {
            cents = cents.checked_mul(10)?;
        }
    }
    if (0..len).contains(&cut) && digits[cut as usize] >= 5 {
        cents = cents.checked_add(1)?;
    }

    Some(ParsedDecimal {
        negative,
        cents,
        nonzero: digits.iter().any(|d| *d != 0),
    })
}

fn parse_exponent(s: &str) -> Option<i64> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(stripped) => (true, stripped),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let value = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -value } else { value })
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyParseError {
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),

    #[error("Amount must be greater than zero: {0}")]
    NotPositive(String),
}
