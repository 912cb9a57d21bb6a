//! # Money Module
//!
//! Exact-decimal helpers for the monetary rules.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    35.35 % 0.25 = 0.09999999999999787                                   │
//! │                                                                         │
//! │  The quarter rule asks "is the remainder EXACTLY zero?", and the        │
//! │  description rule takes a ceiling. Both break on float noise:           │
//! │    ceil(10.00 * 0.2) must be 2, never 3.                                │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal                                    │
//! │    Base-10 mantissa + scale, so "12.25" is stored as 1225 × 10⁻²        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use points_core::money::{ceil_points, is_multiple_of, is_round_dollar, quarter};
//! use rust_decimal::Decimal;
//!
//! let total = Decimal::new(10000, 2); // 100.00
//! assert!(is_round_dollar(total));
//! assert!(is_multiple_of(total, quarter()));
//!
//! assert_eq!(ceil_points(Decimal::new(245, 2)), 3); // ceil(2.45)
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// One quarter dollar, `0.25`.
#[inline]
pub fn quarter() -> Decimal {
    Decimal::new(25, 2)
}

/// Returns true when the amount has no fractional cents.
///
/// Trailing zeros do not matter: `100`, `100.0` and `100.00` are all round.
///
/// ## Example
/// ```rust
/// use points_core::money::is_round_dollar;
/// use rust_decimal::Decimal;
///
/// assert!(is_round_dollar(Decimal::new(3500, 2)));  // 35.00
/// assert!(!is_round_dollar(Decimal::new(3535, 2))); // 35.35
/// ```
#[inline]
pub fn is_round_dollar(amount: Decimal) -> bool {
    amount.fract().is_zero()
}

/// Returns true when `amount` divides evenly by `step`.
///
/// A zero step never divides anything.
pub fn is_multiple_of(amount: Decimal, step: Decimal) -> bool {
    if step.is_zero() {
        return false;
    }
    (amount % step).is_zero()
}

/// Rounds an amount up to the next whole point.
///
/// Negative amounts award nothing; amounts beyond `u64` saturate.
///
/// ## Example
/// ```rust
/// use points_core::money::ceil_points;
/// use rust_decimal::Decimal;
///
/// assert_eq!(ceil_points(Decimal::new(200, 2)), 2); // 2.00 stays 2
/// assert_eq!(ceil_points(Decimal::new(201, 2)), 3); // 2.01 rounds up
/// assert_eq!(ceil_points(Decimal::new(-150, 2)), 0);
/// ```
pub fn ceil_points(amount: Decimal) -> u64 {
    if amount.is_sign_negative() {
        return 0;
    }
    amount.ceil().to_u64().unwrap_or(u64::MAX)
}

/// Multiplies two amounts, saturating instead of panicking on overflow.
pub fn saturating_mul(amount: Decimal, factor: Decimal) -> Decimal {
    amount.checked_mul(factor).unwrap_or(if amount.is_sign_negative() != factor.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// Formats an amount with exactly two decimal places, e.g. `12.25`.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

// =============================================================================
// Unit Tests
// =============================================================================
