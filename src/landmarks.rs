//! Hand landmark points and the 21-point hand topology.
//!
//! Index numbering follows the hand landmark model convention: the wrist is 0,
//! then four joints per digit from the thumb to the pinky, base first.

use crate::constants::NUM_HAND_LANDMARKS;

/// A landmark in normalized image coordinates
///
/// Both components are nominally in `[0, 1]`, relative to frame width and
/// height. Detectors may report points slightly outside the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    /// Horizontal position, 0 at the left edge
    pub x: f64,
    /// Vertical position, 0 at the top edge
    pub y: f64,
}

impl Landmark {
    /// Create a landmark from normalized coordinates
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Landmark {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Named hand landmark indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    /// Index finger base knuckle
    IndexFingerMcp = 5,
    /// Index finger middle joint
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    /// Middle finger base knuckle
    MiddleFingerMcp = 9,
    /// Middle finger middle joint
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    /// Position of this landmark in a landmark list
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up this landmark in a list, if the list is long enough
    #[must_use]
    pub fn get(self, landmarks: &[Landmark]) -> Option<Landmark> {
        landmarks.get(self.index()).copied()
    }
}

/// Bones drawn by the skeleton overlay
pub const HAND_CONNECTIONS: [(HandLandmark, HandLandmark); 21] = {
    use HandLandmark::*;
    [
        (Wrist, ThumbCmc),
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        (Wrist, IndexFingerMcp),
        (IndexFingerMcp, IndexFingerPip),
        (IndexFingerPip, IndexFingerDip),
        (IndexFingerDip, IndexFingerTip),
        (IndexFingerMcp, MiddleFingerMcp),
        (MiddleFingerMcp, MiddleFingerPip),
        (MiddleFingerPip, MiddleFingerDip),
        (MiddleFingerDip, MiddleFingerTip),
        (MiddleFingerMcp, RingFingerMcp),
        (RingFingerMcp, RingFingerPip),
        (RingFingerPip, RingFingerDip),
        (RingFingerDip, RingFingerTip),
        (RingFingerMcp, PinkyMcp),
        (Wrist, PinkyMcp),
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
    ]
};

/// Whether a list carries a full hand
#[must_use]
pub const fn is_complete(landmarks: &[Landmark]) -> bool {
    landmarks.len() >= NUM_HAND_LANDMARKS
}
