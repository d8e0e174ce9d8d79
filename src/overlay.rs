//! Drawing of the hand skeleton and status text onto camera frames.

use crate::{
    actions::Overlay,
    landmarks::{Landmark, HAND_CONNECTIONS},
    utils::safe_cast::f64_to_i32,
    Result,
};
use opencv::{
    core::{Mat, Point, Scalar},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
};

/// Where the gesture label is drawn
const LABEL_ORIGIN: (i32, i32) = (50, 50);

/// Convert a normalized landmark to a pixel position in the frame
fn to_pixel(landmark: Landmark, width: i32, height: i32) -> Option<Point> {
    let x = f64_to_i32(landmark.x * f64::from(width)).ok()?;
    let y = f64_to_i32(landmark.y * f64::from(height)).ok()?;
    Some(Point::new(x, y))
}

/// Draw the bones and joints of a detected hand
pub fn draw_skeleton(frame: &mut Mat, landmarks: &[Landmark]) -> Result<()> {
    let (width, height) = (frame.cols(), frame.rows());
    let points: Vec<Option<Point>> = landmarks.iter().map(|&lm| to_pixel(lm, width, height)).collect();

    for (from, to) in HAND_CONNECTIONS {
        let (Some(Some(start)), Some(Some(end))) = (points.get(from.index()), points.get(to.index())) else {
            continue;
        };
        imgproc::line(frame, *start, *end, Scalar::new(255.0, 255.0, 255.0, 0.0), 2, LINE_8, 0)?;
    }

    for point in points.into_iter().flatten() {
        imgproc::circle(frame, point, 4, Scalar::new(0.0, 0.0, 255.0, 0.0), -1, LINE_8, 0)?;
    }

    Ok(())
}

/// Draw the label of the gesture that fired this frame
pub fn draw_label(frame: &mut Mat, overlay: &Overlay) -> Result<()> {
    let (b, g, r) = overlay.color;
    imgproc::put_text(
        frame,
        overlay.text,
        Point::new(LABEL_ORIGIN.0, LABEL_ORIGIN.1),
        FONT_HERSHEY_SIMPLEX,
        1.0,
        Scalar::new(b, g, r, 0.0),
        2,
        LINE_8,
        false,
    )?;
    Ok(())
}

/// Draw the frame rate in the bottom-left corner
pub fn draw_fps(frame: &mut Mat, fps: f64) -> Result<()> {
    let fps_text = format!("FPS: {:.1}", fps);
    let origin = Point::new(10, frame.rows() - 10);
    imgproc::put_text(
        frame,
        &fps_text,
        origin,
        FONT_HERSHEY_SIMPLEX,
        0.6,
        Scalar::new(0.0, 255.0, 0.0, 0.0),
        1,
        LINE_8,
        false,
    )?;
    Ok(())
}
