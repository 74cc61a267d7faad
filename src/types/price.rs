//! Fixed-point price and quantity utilities.
//!
//! ## Overview
//!
//! Prices and quantities are stored as u64 scaled by 10^8, so comparisons in
//! the matching path are plain integer comparisons and replay never depends on
//! floating-point behaviour. `rust_decimal` is only used at the edges, to turn
//! decimal text into fixed-point and back.
//!
//! ## Examples
//!
//! ```
//! use seqbook::types::price::{to_fixed, from_fixed, from_fixed_trimmed};
//!
//! let price = to_fixed("50000.12345678").unwrap();
//! assert_eq!(price, 5_000_012_345_678);
//!
//! assert_eq!(from_fixed(price), "50000.12345678");
//! assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point arithmetic: 10^8
pub const SCALE: u64 = 100_000_000;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// Returns `None` if the string does not parse, is negative, carries more
/// than 8 decimal places, or does not fit in a u64 after scaling.
///
/// ```
/// use seqbook::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("0.000000001"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to fixed-point u64 without rounding.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() && !d.is_zero() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    if !scaled.fract().is_zero() {
        return None;
    }
    scaled.trunc().to_u64()
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert fixed-point u64 to a string with 8 decimal places
pub fn from_fixed(value: u64) -> String {
    let decimal = fixed_to_decimal(value);
    format!("{:.8}", decimal)
}

/// Convert fixed-point u64 to a string without trailing zeros
pub fn from_fixed_trimmed(value: u64) -> String {
    fixed_to_decimal(value).normalize().to_string()
}

// ============================================================================
// Unit Tests
// ============================================================================
