//! Safe casting utilities to prevent overflow on 32-bit systems

use crate::{Error, Result};

/// Safely convert usize to i32 with overflow checking
///
/// # Errors
///
/// Returns an error if the value exceeds i32::MAX
pub fn usize_to_i32(value: usize) -> Result<i32> {
    value
        .try_into()
        .map_err(|_| Error::InvalidInput(format!("Value {value} too large to fit in i32")))
}

/// Safely convert f64 to i32 with bounds checking, truncating towards zero
///
/// # Errors
///
/// Returns an error if the value is not finite or outside i32 range
#[allow(clippy::cast_possible_truncation)] // Truncation after bounds check is safe
pub fn f64_to_i32(value: f64) -> Result<i32> {
    if value.is_finite() && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Ok(value as i32)
    } else {
        Err(Error::InvalidInput(format!(
            "Value {value} cannot be safely converted to i32"
        )))
    }
}

/// Clamp and convert f32 to i32 for pixel coordinates
#[must_use]
#[allow(clippy::cast_precision_loss)] // Acceptable for clamping bounds
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn f32_to_i32_clamp(value: f32, min: i32, max: i32) -> i32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.clamp(min as f32, max as f32);
    (clamped as i32).clamp(min, max)
}

/// Clamp an i32 into the i16 range used by X11 coordinates
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamped into range first
pub fn i32_to_i16_saturating(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}
