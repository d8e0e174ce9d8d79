//! Gesture classification from a single frame of hand landmarks.
//!
//! Each frame is classified on its own. Three measurements are taken from the
//! landmark list (the thumb-index distance and the curl angles of the index
//! and middle fingers) and checked against a fixed rule table in priority
//! order. The first matching rule is the verdict.

use crate::{
    constants::{FINGER_BENT_MAX_ANGLE, FINGER_EXTENDED_MIN_ANGLE, THUMB_INDEX_GATE},
    geometry::{calculate_angle, calculate_distance},
    landmarks::{is_complete, HandLandmark, Landmark},
    utils::safe_cast::f64_to_i32,
};
use std::fmt;

/// Discrete outcome of classifying one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gesture {
    /// Thumb tucked against the index base with the index finger extended
    Move,
    LeftClick,
    RightClick,
    DoubleClick,
    Screenshot,
    /// No rule matched or no hand was visible
    #[default]
    None,
}

impl Gesture {
    /// Rules in evaluation order
    pub const PRIORITY: [Self; 5] = [
        Self::Move,
        Self::LeftClick,
        Self::RightClick,
        Self::DoubleClick,
        Self::Screenshot,
    ];

    /// Text drawn on the frame when this gesture fires
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::LeftClick => Some("Left Click"),
            Self::RightClick => Some("Right Click"),
            Self::DoubleClick => Some("Double Click"),
            Self::Screenshot => Some("Screenshot Taken"),
            Self::Move | Self::None => None,
        }
    }

    /// Overlay colour as BGR components
    #[must_use]
    pub const fn overlay_color(self) -> Option<(f64, f64, f64)> {
        match self {
            Self::LeftClick => Some((0.0, 255.0, 0.0)),
            Self::RightClick => Some((0.0, 0.0, 255.0)),
            Self::DoubleClick | Self::Screenshot => Some((255.0, 255.0, 0.0)),
            Self::Move | Self::None => None,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Move => "move",
            Self::LeftClick => "left click",
            Self::RightClick => "right click",
            Self::DoubleClick => "double click",
            Self::Screenshot => "screenshot",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// Screen size in pixels, used to place the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,
}

impl ScreenGeometry {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Map a fingertip to a cursor position
    ///
    /// The horizontal axis spans the full frame width. Only the upper half of
    /// the frame maps onto the screen height, so `y = tip.y / 2 * height`.
    /// Both components are truncated towards zero. Returns `None` when the
    /// result does not fit in an `i32`.
    #[must_use]
    pub fn cursor_target(&self, tip: Landmark) -> Option<CursorTarget> {
        let x = f64_to_i32(tip.x * f64::from(self.width)).ok()?;
        let y = f64_to_i32(tip.y / 2.0 * f64::from(self.height)).ok()?;
        Some(CursorTarget { x, y })
    }
}

/// Screen-pixel position for a cursor move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorTarget {
    pub x: i32,
    pub y: i32,
}

/// Measurements a verdict is derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandMeasurements {
    /// Rescaled distance from the thumb tip to the index finger base
    pub thumb_index_distance: f64,
    /// Curl angle at the index finger middle joint
    pub index_angle: f64,
    /// Curl angle at the middle finger middle joint
    pub middle_angle: f64,
}

impl HandMeasurements {
    /// Measure a landmark list, or `None` if it does not hold a full hand
    #[must_use]
    pub fn from_landmarks(landmarks: &[Landmark]) -> Option<Self> {
        if !is_complete(landmarks) {
            return None;
        }
        let point = |id: HandLandmark| landmarks[id.index()];

        let thumb_index_distance = calculate_distance(&[
            point(HandLandmark::ThumbTip),
            point(HandLandmark::IndexFingerMcp),
        ])?;
        let index_angle = calculate_angle(
            point(HandLandmark::IndexFingerMcp),
            point(HandLandmark::IndexFingerPip),
            point(HandLandmark::IndexFingerTip),
        );
        let middle_angle = calculate_angle(
            point(HandLandmark::MiddleFingerMcp),
            point(HandLandmark::MiddleFingerPip),
            point(HandLandmark::MiddleFingerTip),
        );

        Some(Self {
            thumb_index_distance,
            index_angle,
            middle_angle,
        })
    }

    fn index_bent(&self) -> bool {
        self.index_angle < FINGER_BENT_MAX_ANGLE
    }

    fn index_extended(&self) -> bool {
        self.index_angle > FINGER_EXTENDED_MIN_ANGLE
    }

    fn middle_bent(&self) -> bool {
        self.middle_angle < FINGER_BENT_MAX_ANGLE
    }

    fn middle_extended(&self) -> bool {
        self.middle_angle > FINGER_EXTENDED_MIN_ANGLE
    }

    fn hand_open(&self) -> bool {
        self.thumb_index_distance > THUMB_INDEX_GATE
    }

    fn hand_pinched(&self) -> bool {
        self.thumb_index_distance < THUMB_INDEX_GATE
    }

    /// Whether the trigger condition of `gesture` holds, ignoring priority
    ///
    /// `Gesture::None` matches only when no other rule does.
    #[must_use]
    pub fn matches(&self, gesture: Gesture) -> bool {
        match gesture {
            Gesture::Move => self.hand_pinched() && self.index_extended(),
            Gesture::LeftClick => self.index_bent() && self.middle_extended() && self.hand_open(),
            Gesture::RightClick => self.middle_bent() && self.index_extended() && self.hand_open(),
            Gesture::DoubleClick => self.index_bent() && self.middle_bent() && self.hand_open(),
            Gesture::Screenshot => self.index_bent() && self.middle_bent() && self.hand_pinched(),
            Gesture::None => !Gesture::PRIORITY.iter().any(|&g| self.matches(g)),
        }
    }

    /// First rule in priority order whose condition holds
    #[must_use]
    pub fn evaluate(&self) -> Gesture {
        Gesture::PRIORITY
            .into_iter()
            .find(|&gesture| self.matches(gesture))
            .unwrap_or(Gesture::None)
    }
}

/// Verdict for one frame plus the cursor position a move should go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureDecision {
    pub gesture: Gesture,
    /// Set only for [`Gesture::Move`] when the fingertip could be mapped
    pub cursor_target: Option<CursorTarget>,
}

impl GestureDecision {
    /// Decision that triggers nothing
    #[must_use]
    pub const fn none() -> Self {
        Self {
            gesture: Gesture::None,
            cursor_target: None,
        }
    }
}

/// Rule engine mapping hand landmarks to gestures
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    screen: ScreenGeometry,
}

impl GestureClassifier {
    /// Create a classifier that places the cursor on a screen of this size
    #[must_use]
    pub const fn new(screen: ScreenGeometry) -> Self {
        Self { screen }
    }

    /// Screen the cursor targets are computed for
    #[must_use]
    pub const fn screen(&self) -> ScreenGeometry {
        self.screen
    }

    /// Classify one frame
    ///
    /// `index_finger_tip` is the fingertip the detector reported for this
    /// frame. When it is missing a move is still recognised but carries no
    /// cursor target.
    #[must_use]
    pub fn classify(&self, landmarks: &[Landmark], index_finger_tip: Option<Landmark>) -> GestureDecision {
        let Some(measurements) = HandMeasurements::from_landmarks(landmarks) else {
            return GestureDecision::none();
        };

        let gesture = measurements.evaluate();
        let cursor_target = match gesture {
            Gesture::Move => index_finger_tip.and_then(|tip| self.screen.cursor_target(tip)),
            _ => None,
        };

        log::trace!(
            "thumb-index {:.1}, index {:.1}°, middle {:.1}° -> {}",
            measurements.thumb_index_distance,
            measurements.index_angle,
            measurements.middle_angle,
            gesture
        );

        GestureDecision {
            gesture,
            cursor_target,
        }
    }
}
