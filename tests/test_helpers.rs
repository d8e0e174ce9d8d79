//! Helper functions and test doubles shared by the integration tests

#![allow(dead_code)]

use hand_gesture_mouse::{
    cursor_control::{MouseButton, MouseControl},
    gesture::ScreenGeometry,
    hand_detection::{HandDetection, HandDetector},
    landmarks::{HandLandmark, Landmark},
    screenshot::ScreenCapture,
    Result,
};
use opencv::core::Mat;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Length of the finger segments in the synthetic hands
const SEGMENT: f64 = 0.1;

/// Joint of a finger whose tip makes `angle` degrees with a base straight below
///
/// The base sits one segment below the joint, so its ray heading is 90°. The
/// tip ray is placed at `90° - angle`, which the angle formula turns back into
/// exactly `angle` for any value in `(0, 180)`.
fn finger(joint: Landmark, angle: f64) -> (Landmark, Landmark) {
    let base = Landmark::new(joint.x, joint.y + SEGMENT);
    let heading = (90.0 - angle).to_radians();
    let tip = Landmark::new(joint.x + SEGMENT * heading.cos(), joint.y + SEGMENT * heading.sin());
    (base, tip)
}

/// A 21-point hand with the given curl angles and thumb-index distance
pub fn hand_pose(index_angle: f64, middle_angle: f64, thumb_index_distance: f64) -> Vec<Landmark> {
    let mut landmarks = vec![Landmark::new(0.5, 0.8); 21];

    let index_joint = Landmark::new(0.4, 0.5);
    let (index_base, index_tip) = finger(index_joint, index_angle);
    landmarks[HandLandmark::IndexFingerMcp.index()] = index_base;
    landmarks[HandLandmark::IndexFingerPip.index()] = index_joint;
    landmarks[HandLandmark::IndexFingerTip.index()] = index_tip;

    let middle_joint = Landmark::new(0.6, 0.5);
    let (middle_base, middle_tip) = finger(middle_joint, middle_angle);
    landmarks[HandLandmark::MiddleFingerMcp.index()] = middle_base;
    landmarks[HandLandmark::MiddleFingerPip.index()] = middle_joint;
    landmarks[HandLandmark::MiddleFingerTip.index()] = middle_tip;

    landmarks[HandLandmark::ThumbTip.index()] =
        Landmark::new(index_base.x + thumb_index_distance / 1000.0, index_base.y);

    landmarks
}

/// Mouse calls observed by [`RecordingMouse`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MouseEvent {
    MoveTo(i32, i32),
    Press(MouseButton),
    Release(MouseButton),
}

/// Mouse that records every call instead of touching the system
#[derive(Debug)]
pub struct RecordingMouse {
    pub screen: ScreenGeometry,
    pub events: Vec<MouseEvent>,
}

impl RecordingMouse {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            screen: ScreenGeometry::new(width, height),
            events: Vec::new(),
        }
    }
}

impl MouseControl for RecordingMouse {
    fn screen_geometry(&self) -> ScreenGeometry {
        self.screen
    }

    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.events.push(MouseEvent::MoveTo(x, y));
        Ok(())
    }

    fn press(&mut self, button: MouseButton) -> Result<()> {
        self.events.push(MouseEvent::Press(button));
        Ok(())
    }

    fn release(&mut self, button: MouseButton) -> Result<()> {
        self.events.push(MouseEvent::Release(button));
        Ok(())
    }
}

/// Screen capture that records requested paths without writing files
#[derive(Debug, Default)]
pub struct RecordingCapture {
    pub saved: Vec<PathBuf>,
}

impl ScreenCapture for RecordingCapture {
    fn save_screenshot(&mut self, path: &Path) -> Result<()> {
        self.saved.push(path.to_path_buf());
        Ok(())
    }
}

/// Detector replaying a fixed sequence of results, then reporting no hand
#[derive(Debug, Default)]
pub struct ScriptedDetector {
    pub frames: VecDeque<Option<HandDetection>>,
}

impl ScriptedDetector {
    pub fn new(frames: impl IntoIterator<Item = Option<Vec<Landmark>>>) -> Self {
        Self {
            frames: frames
                .into_iter()
                .map(|frame| frame.map(|landmarks| HandDetection { landmarks, score: 0.95 }))
                .collect(),
        }
    }
}

impl HandDetector for ScriptedDetector {
    fn detect(&mut self, _rgb_frame: &Mat) -> Result<Option<HandDetection>> {
        Ok(self.frames.pop_front().flatten())
    }
}
