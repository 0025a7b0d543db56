//! # Money Module
//!
//! Provides the `Money` type for handling monetary amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: integer minor units                                      │
//! │    Every subtotal, shipping cost, discount and total is an i64.         │
//! │    The storefront sells in a single currency (pesos) displayed with     │
//! │    ZERO decimals, so one minor unit == one displayed peso.              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tienda_core::money::Money;
//!
//! let price = Money::new(1490);
//! let line = price * 2i64;
//! assert_eq!(line.amount(), 2980);
//! assert_eq!(line.to_string(), "$ 2.980");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the storefront currency's minor unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate results (subtotal - discount) may dip
///   below zero before clamping
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives `Ord`**: free-shipping threshold checks are plain comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from an amount in minor units.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::money::Money;
    ///
    /// let price = Money::new(1490);
    /// assert_eq!(price.amount(), 1490);
    /// ```
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount in minor units.
    #[inline]
    pub const fn amount(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies the amount by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::money::Money;
    ///
    /// let unit_price = Money::new(990);
    /// assert_eq!(unit_price.multiply_quantity(3).amount(), 2970);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Clamps a (possibly negative) amount to a zero floor.
    ///
    /// An order total must never be displayed as negative: when a discount
    /// exceeds subtotal + shipping the result floors at zero.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::money::Money;
    ///
    /// assert_eq!(Money::new(-250).clamp_zero().amount(), 0);
    /// assert_eq!(Money::new(250).clamp_zero().amount(), 250);
    /// ```
    #[inline]
    pub fn clamp_zero(&self) -> Self {
        Money(self.0.max(0))
    }

    /// Formats the amount with the given currency symbol.
    ///
    /// Zero-decimal display with dot thousands grouping, the convention the
    /// storefront uses everywhere: `format_with("$")` → `"$ 12.480"`.
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{} {}", sign, symbol, group_thousands(self.0.abs()))
    }
}

/// Groups an absolute amount into dot-separated thousands: 12480 → "12.480".
fn group_thousands(mut amount: i64) -> String {
    if amount == 0 {
        return "0".to_string();
    }

    let mut groups = Vec::new();
    while amount > 0 {
        groups.push((amount % 1000) as u16);
        amount /= 1000;
    }

    let mut out = groups
        .last()
        .map(|g| g.to_string())
        .unwrap_or_else(|| "0".to_string());
    for group in groups.iter().rev().skip(1) {
        out.push('.');
        out.push_str(&format!("{:03}", group));
    }
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in the storefront's own convention.
///
/// Uses the default "$" symbol; views with a configured symbol go through
/// [`Money::format_with`] instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with("$"))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
