//! Unit conversion utilities.
//!
//! WordprocessingML measures lengths in several integer units depending on
//! context: twips (twentieths of a point) for indentation and table
//! measures, eighths of a point for border weights, half-points for run
//! font sizes, and EMUs for drawing extents. The ratios are fixed by the
//! schema and not configurable.

use crate::common::error::{Error, Result};

pub const TWIPS_PER_INCH: i64 = 1_440;
pub const EIGHTHS_PER_POINT: i64 = 8;
pub const TWENTIETHS_PER_POINT: i64 = 20;
pub const HALF_POINTS_PER_POINT: i64 = 2;
pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PX_96DPI: i64 = 9_525;

#[inline]
fn finite(value: f64, unit: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidUnit(format!(
            "{} value must be finite, got {}",
            unit, value
        )))
    }
}

/// Convert inches to twips (twentieths of a point, 1440 per inch).
///
/// Negative values are allowed; whether they make sense is up to the caller
/// (indentation may be negative, sizes may not).
///
/// # Examples
///
/// ```
/// use longan::common::unit::inches_to_twips;
/// assert_eq!(inches_to_twips(1.0).unwrap(), 1440);
/// assert_eq!(inches_to_twips(-0.5).unwrap(), -720);
/// ```
#[inline]
pub fn inches_to_twips(inches: f64) -> Result<i64> {
    Ok((finite(inches, "inch")? * TWIPS_PER_INCH as f64).round() as i64)
}

/// Convert points to eighths of a point (border and line weights).
///
/// # Examples
///
/// ```
/// use longan::common::unit::points_to_eighths;
/// assert_eq!(points_to_eighths(1.5).unwrap(), 12);
/// ```
#[inline]
pub fn points_to_eighths(points: f64) -> Result<i64> {
    Ok((finite(points, "point")? * EIGHTHS_PER_POINT as f64).round() as i64)
}

/// Convert points to twentieths of a point (spacing and row heights).
#[inline]
pub fn points_to_twentieths(points: f64) -> Result<i64> {
    Ok((finite(points, "point")? * TWENTIETHS_PER_POINT as f64).round() as i64)
}

/// Convert points to half-points (run font sizes).
#[inline]
pub fn points_to_half_points(points: f64) -> Result<i64> {
    Ok((finite(points, "point")? * HALF_POINTS_PER_POINT as f64).round() as i64)
}

/// Convert inches to EMUs (English Metric Units, drawing extents).
#[inline]
pub fn inches_to_emu(inches: f64) -> Result<i64> {
    Ok((finite(inches, "inch")? * EMUS_PER_INCH as f64).round() as i64)
}

/// Convert pixels to EMUs assuming 96 DPI.
#[inline]
pub fn px_to_emu(px: u32) -> i64 {
    px as i64 * EMUS_PER_PX_96DPI
}
