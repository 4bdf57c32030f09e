//! # Money Module
//!
//! Provides the `Money` type used for product prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "49.90" is parsed straight into 4990 cents, no float involved        │
//! │    Display always shows exactly two decimal places                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use estoque_core::money::Money;
//!
//! let price: Money = "49.90".parse().unwrap();
//! assert_eq!(price.cents(), 4990);
//! assert_eq!(price.to_string(), "49.90");
//!
//! // Digits past the second decimal place are truncated, not rounded
//! let truncated: Money = "10.999".parse().unwrap();
//! assert_eq!(truncated.cents(), 1099);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of minor units in one major unit.
const CENTS_PER_UNIT: i64 = 100;

/// Slack, in cents, when truncating an `f64` read from storage.
const DECIMAL_TOLERANCE: f64 = 1e-6;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Parsing accepts a sign so validation can report a
///   proper "must not be negative" message instead of a format error
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use estoque_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal number read from storage into Money.
    ///
    /// Digits past the second decimal are truncated toward zero, the same
    /// rule `FromStr` applies to typed input, so a stored `10.999` reads as
    /// `10.99`. A tolerance below one millionth of a cent absorbs binary
    /// representation noise (`39.9` is `39.899999...` as an `f64`).
    ///
    /// ## Example
    /// ```rust
    /// use estoque_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(39.9).cents(), 3990);
    /// assert_eq!(Money::from_decimal(10.999).cents(), 1099);
    /// assert_eq!(Money::from_decimal(120.0).cents(), 12000);
    /// ```
    pub fn from_decimal(value: f64) -> Self {
        let scaled = value * CENTS_PER_UNIT as f64;
        let nudged = scaled + DECIMAL_TOLERANCE.copysign(scaled);
        Money(nudged.trunc() as i64)
    }

    /// Returns the value as a decimal number, for binding to a NUMERIC column.
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Error returned when text cannot be read as a money amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    #[error("value is empty")]
    Empty,

    #[error("'{0}' is not a valid decimal number")]
    Invalid(String),

    #[error("'{0}' is too large")]
    Overflow(String),
}

/// Parses decimal text such as `"49.90"`, `"120"`, `".5"` or `"-3.25"`.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - `.` is the only decimal separator
/// - Digits beyond the second decimal place are truncated
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let invalid = || ParseMoneyError::Invalid(text.to_string());
        let overflow = || ParseMoneyError::Overflow(text.to_string());

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };

        // First two fractional digits, right-padded: "5" -> 50, "05" -> 5
        let mut cents_part = 0;
        for (i, digit) in fraction.bytes().take(2).enumerate() {
            let weight = if i == 0 { 10 } else { 1 };
            cents_part += (digit - b'0') as i64 * weight;
        }

        let cents = units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(cents_part))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with exactly two decimal places and no currency
/// symbol. The CLI adds the configured symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
