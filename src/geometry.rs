//! Angle and distance primitives over normalized landmarks.

use crate::{constants::DISTANCE_SCALE, landmarks::Landmark};

/// Angle in degrees at vertex `b` between the rays towards `a` and `c`
///
/// This is the absolute difference of the two ray headings. It is not folded
/// back into `[0, 180]`, so a reflex configuration can yield up to 360.
#[must_use]
pub fn calculate_angle(a: Landmark, b: Landmark, c: Landmark) -> f64 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    radians.to_degrees().abs()
}

/// Distance between the first two points, rescaled from `[0, 1]` to `[0, 1000]`
///
/// Returns `None` when fewer than two points are given. Distances beyond the
/// unit range saturate at the upper bound.
#[must_use]
pub fn calculate_distance(points: &[Landmark]) -> Option<f64> {
    let [first, second, ..] = points else {
        return None;
    };
    let distance = (second.x - first.x).hypot(second.y - first.y);
    Some(interpolate(distance, (0.0, 1.0), (0.0, DISTANCE_SCALE)))
}

/// Piecewise-linear map of `value` from `from` onto `to`, clamped at the ends
fn interpolate(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    if value <= from.0 {
        return to.0;
    }
    if value >= from.1 {
        return to.1;
    }
    to.0 + (value - from.0) * (to.1 - to.0) / (from.1 - from.0)
}
