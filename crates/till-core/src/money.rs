//! # Money Module
//!
//! Prices and totals as whole cents.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE RUNNING TOTAL PROBLEM                                              │
//! │                                                                         │
//! │  With floating point, a cart that adds 0.10 and removes it again can   │
//! │  end up at 0.000000000000001 instead of 0.                              │
//! │                                                                         │
//! │  Till stores cents in an i64                                            │
//! │    The cart keeps a cached total. Adding and subtracting whole cents    │
//! │    is exact, so the cache never drifts from the sum of its items.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let price = Money::from_cents(1099);
//!
//! // Or parse what the admin typed
//! let typed: Money = "10.99".parse().unwrap();
//! assert_eq!(price, typed);
//!
//! let total = price + Money::from_cents(500);
//! assert_eq!(total.to_decimal_string(), "15.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Discount;

// =============================================================================
// Money Type
// =============================================================================

/// An amount of money in cents.
///
/// Signed, so a shrinking cart total can be computed with plain subtraction.
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► Product::final_price() ──► Cart.total ──► Invoice total
///                          │
///                          └──► "9.00" in inventory, cart and invoice tables
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Wraps a cent count.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Total cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Cents past the whole dollars, 0 to 99 regardless of sign.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// The amount left after taking `bps` basis points off (1000 bps = 10 %).
    ///
    /// The amount taken off is rounded half-up to a whole cent first.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1000).apply_percentage_discount(1000).cents(), 900);
    /// ```
    pub fn apply_percentage_discount(&self, bps: u32) -> Money {
        let off = (i128::from(self.0) * i128::from(bps) + 5000) / 10000;
        Money(self.0 - off as i64)
    }

    /// Applies a [`Discount`] to this amount.
    #[inline]
    pub fn apply_discount(&self, discount: Discount) -> Money {
        self.apply_percentage_discount(discount.bps())
    }

    /// Formats the amount without a currency symbol, always with two decimals.
    ///
    /// This is the form used in tables and in the catalog file.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(900).to_decimal_string(), "9.00");
    /// assert_eq!(Money::from_cents(-5).to_decimal_string(), "-0.05");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal amount such as `10`, `10.5`, `$9.99` or `-1.25`.
///
/// ## Rules
/// - Optional leading `-`, then an optional `$`
/// - Digits, optionally followed by `.` and more digits
/// - Digits past the second decimal place round half-up to the nearest cent
///   (`3.335` → 334 cents)
/// - No exponents, no thousands separators
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CoreError::InvalidMoney {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let input = s.trim();
        let (negative, body) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let body = body.strip_prefix('$').unwrap_or(body);

        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("expected a number"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("expected digits with an optional decimal point"));
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount is too large"))?
        };

        let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        let cents = whole_value
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with a dollar sign: `$10.99`, `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts() {
        let price = Money::from_cents(1899);
        assert_eq!((price.dollars(), price.cents_part()), (18, 99));

        let refund = Money::from_cents(-205);
        assert_eq!((refund.dollars(), refund.cents_part()), (-2, 5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1800).to_string(), "$18.00");
        assert_eq!(Money::from_cents(9).to_string(), "$0.09");
        assert_eq!(Money::from_cents(-205).to_string(), "-$2.05");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(1800).to_decimal_string(), "18.00");
        assert_eq!(Money::from_cents(7).to_decimal_string(), "0.07");
        assert_eq!(Money::from_cents(-550).to_decimal_string(), "-5.50");
    }

    #[test]
    fn test_parse_plain_amounts() {
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("9.99".parse::<Money>().unwrap().cents(), 999);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);
        assert_eq!("3.".parse::<Money>().unwrap().cents(), 300);
        assert_eq!(" $4.20 ".parse::<Money>().unwrap().cents(), 420);
        assert_eq!("-1.25".parse::<Money>().unwrap().cents(), -125);
    }

    #[test]
    fn test_parse_rounds_extra_digits_half_up() {
        assert_eq!("3.334".parse::<Money>().unwrap().cents(), 333);
        assert_eq!("3.335".parse::<Money>().unwrap().cents(), 334);
        assert_eq!("0.999".parse::<Money>().unwrap().cents(), 100);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", ".", "abc", "1.2.3", "1e5", "1,50", "--1", "12 34"] {
            assert!(
                matches!(input.parse::<Money>(), Err(CoreError::InvalidMoney { .. })),
                "{input:?} should not parse"
            );
        }
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_decimal_string_parses_back() {
        for cents in [0, 1, 99, 100, 1099, 123456] {
            let money = Money::from_cents(cents);
            assert_eq!(money.to_decimal_string().parse::<Money>().unwrap(), money);
        }
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(900);
        let b = Money::from_cents(250);

        assert_eq!((a + b).cents(), 1150);
        assert_eq!((a - b).cents(), 650);

        let mut running = Money::zero();
        running += a;
        running -= b;
        assert_eq!(running.cents(), 650);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 1400);
    }

    #[test]
    fn test_discount_rounding() {
        assert_eq!(Money::from_cents(10000).apply_percentage_discount(1000).cents(), 9000);
        assert_eq!(Money::from_cents(1000).apply_percentage_discount(0).cents(), 1000);
        assert_eq!(Money::from_cents(1000).apply_percentage_discount(10000).cents(), 0);
        // 9.99 at 10% off is 8.991, the 0.999 discount rounds to 1.00
        assert_eq!(Money::from_cents(999).apply_percentage_discount(1000).cents(), 899);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_cents(-1).is_negative());
        assert_eq!(Money::default(), Money::zero());
    }
}
