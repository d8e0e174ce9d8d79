//! Utility functions for image regions and coordinate transformations.

pub mod image_conversion;
pub mod safe_cast;

use crate::landmarks::Landmark;
use opencv::core::Rect;
use safe_cast::f32_to_i32_clamp;

/// Smallest tracking region worth cropping, in pixels
const MIN_ROI_SIDE: i32 = 16;

/// Square region around a set of normalized landmarks, in frame pixels
///
/// The landmark bounding box is scaled by `scale` around its centre, made
/// square, and shifted so it stays inside the frame. Returns `None` for an
/// empty landmark set or a region too small to be useful.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Landmark coordinates are normalized
pub fn landmark_roi(landmarks: &[Landmark], frame_width: i32, frame_height: i32, scale: f32) -> Option<Rect> {
    if landmarks.is_empty() || frame_width <= 0 || frame_height <= 0 {
        return None;
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for lm in landmarks {
        min_x = min_x.min(lm.x);
        min_y = min_y.min(lm.y);
        max_x = max_x.max(lm.x);
        max_y = max_y.max(lm.y);
    }

    let width = (max_x - min_x) as f32 * frame_width as f32;
    let height = (max_y - min_y) as f32 * frame_height as f32;
    let center_x = (min_x + max_x) as f32 / 2.0 * frame_width as f32;
    let center_y = (min_y + max_y) as f32 / 2.0 * frame_height as f32;

    let max_side = frame_width.min(frame_height);
    let side = f32_to_i32_clamp(width.max(height) * scale, 0, max_side);
    if side < MIN_ROI_SIDE {
        return None;
    }

    let x = f32_to_i32_clamp(center_x - side as f32 / 2.0, 0, frame_width - side);
    let y = f32_to_i32_clamp(center_y - side as f32 / 2.0, 0, frame_height - side);

    Some(Rect::new(x, y, side, side))
}
