//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Minor Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Prices come from the product service as JSON numbers (100, 49.5).     │
//! │  Money stores them as an i64 count of minor units (1/100 of a unit):   │
//! │                                                                         │
//! │    ₹100   → Money(10000)                                               │
//! │    ₹49.50 → Money(4950)                                                │
//! │                                                                         │
//! │  Line totals and subtotals are exact. Tax is the only rounded step:   │
//! │  it rounds to a whole unit (see `calculate_tax`), so a whole-unit     │
//! │  cart still prints "Subtotal: 200 / GST (18%): 36 / TOTAL: 286".      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_minor(4950);
//! let line_total = price * 3;
//! assert_eq!(line_total.minor(), 14850);
//! assert_eq!(line_total.to_string(), "148.5");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::types::TaxRate;

/// Minor units per whole billing unit.
pub const MINOR_PER_UNIT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor units (1/100 of a billing unit).
///
/// Signed so that arithmetic never wraps on an intermediate difference,
/// although every amount the core produces is non-negative. Amounts stay
/// far from `i64` limits because prices and fees are capped at
/// [`crate::MAX_AMOUNT_UNITS`] where they enter the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * MINOR_PER_UNIT)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount, rounded to the nearest whole unit.
    ///
    /// ## Rounding
    /// Round half up on the exact value, in i128:
    /// `(minor * bps + 500_000) / 1_000_000` whole units.
    ///
    /// ```text
    /// 1000.00 × 18% = 180.00 → 180
    ///  999.00 × 18% = 179.82 → 180
    ///   25.00 × 18% =   4.50 →   5
    ///   49.50 × 18% =   8.91 →   9
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::types::TaxRate;
    ///
    /// let tax = Money::from_units(999).calculate_tax(TaxRate::from_bps(1800));
    /// assert_eq!(tax, Money::from_units(180));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let divisor = MINOR_PER_UNIT as i128 * 10_000;
        let units = (self.0 as i128 * rate.bps() as i128 + divisor / 2) / divisor;
        Money(units as i64 * MINOR_PER_UNIT)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shortest decimal form, exactly as it appears in the order text:
/// `286`, `49.5`, `49.05`.
///
/// Currency symbols are a view concern (`ConfigState::format_currency`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_unit = MINOR_PER_UNIT as u64;
        let (whole, frac) = (abs / per_unit, abs % per_unit);

        match frac {
            0 => write!(f, "{}{}", sign, whole),
            frac if frac % 10 == 0 => write!(f, "{}{}.{}", sign, whole, frac / 10),
            frac => write!(f, "{}{}.{:02}", sign, whole, frac),
        }
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

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
