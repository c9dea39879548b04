//! Conversions from protocol-native fixed-point encodings.
//!
//! Upstream lending data arrives as decimal strings in three encodings:
//!
//! - **Basis points**: risk parameters such as max LTV (`8000` = 80%)
//! - **Ray**: per-second-compounded rates scaled by `10^27`
//! - **Base units**: token balances scaled by `10^decimals`
//!
//! Every converter is total. Malformed, empty or non-finite input degrades
//! to `0.0` instead of failing, so one bad reserve never aborts a refresh.
//!
//! Strings are parsed with [`Decimal`] first so that scaling is exact; values
//! Decimal cannot hold (exponent notation, more than 28 significant digits)
//! fall back to `f64` parsing.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Number of decimal places in a basis-point encoding.
pub const BPS_DECIMALS: u32 = 4;

/// Number of decimal places in a ray encoding.
pub const RAY_DECIMALS: u32 = 27;

/// Upper bound applied to LTV and liquidation-threshold fractions.
pub const MAX_RISK_FRACTION: f64 = 0.99;

/// Converts a basis-point string into a fraction clamped to `[0, 0.99]`.
///
/// ```
/// use loanscope_core::units::basis_points_to_fraction;
///
/// assert!((basis_points_to_fraction("8250") - 0.825).abs() < 1e-12);
/// assert_eq!(basis_points_to_fraction("10000"), 0.99);
/// assert_eq!(basis_points_to_fraction("n/a"), 0.0);
/// ```
#[must_use]
pub fn basis_points_to_fraction(raw: &str) -> f64 {
    scale_down(raw, BPS_DECIMALS).clamp(0.0, MAX_RISK_FRACTION)
}

/// Converts a ray-scaled rate string into a fraction floored at zero.
///
/// No upper clamp is applied: rates can legitimately exceed 100% when a
/// reserve's utilization spikes.
///
/// ```
/// use loanscope_core::units::ray_to_fraction;
///
/// assert!((ray_to_fraction("20000000000000000000000000") - 0.02).abs() < 1e-12);
/// assert_eq!(ray_to_fraction("-1"), 0.0);
/// ```
#[must_use]
pub fn ray_to_fraction(raw: &str) -> f64 {
    scale_down(raw, RAY_DECIMALS).max(0.0)
}

/// Converts a token balance in base units into decimal token units.
///
/// ```
/// use loanscope_core::units::base_units_to_decimal;
///
/// assert!((base_units_to_decimal("15000000000", 6) - 15_000.0).abs() < 1e-9);
/// assert_eq!(base_units_to_decimal("", 18), 0.0);
/// ```
#[must_use]
pub fn base_units_to_decimal(raw: &str, decimals: u32) -> f64 {
    scale_down(raw, decimals)
}

/// Parses `raw` and divides it by `10^decimals`, returning 0 on any failure.
fn scale_down(raw: &str, decimals: u32) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let value = scale_decimal(trimmed, decimals).or_else(|| scale_float(trimmed, decimals));
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Exact path: shifts the decimal scale instead of dividing.
fn scale_decimal(raw: &str, decimals: u32) -> Option<f64> {
    let parsed = Decimal::from_str(raw).ok()?;
    let scale = parsed.scale().checked_add(decimals)?;
    let scaled = Decimal::try_from_i128_with_scale(parsed.mantissa(), scale).ok()?;
    scaled.to_f64()
}

fn scale_float(raw: &str, decimals: u32) -> Option<f64> {
    let parsed = raw.parse::<f64>().ok()?;
    let divisor = 10f64.powi(i32::try_from(decimals).ok()?);
    Some(parsed / divisor)
}
