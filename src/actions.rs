//! Side effects of a gesture decision.

use crate::{
    cursor_control::{MouseButton, MouseControl},
    error::Result,
    gesture::{Gesture, GestureDecision},
    screenshot::{next_screenshot_path, ScreenCapture},
};
use log::{debug, info};
use rand::{rngs::ThreadRng, Rng};
use std::path::PathBuf;

/// Text drawn on the frame after an action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub text: &'static str,
    /// BGR colour
    pub color: (f64, f64, f64),
}

impl Overlay {
    /// Overlay for a gesture, if it has one
    #[must_use]
    pub fn for_gesture(gesture: Gesture) -> Option<Self> {
        Some(Self {
            text: gesture.label()?,
            color: gesture.overlay_color()?,
        })
    }
}

/// Applies decisions through the mouse and screen collaborators
pub struct GestureActions<M, S, R = ThreadRng> {
    mouse: M,
    capture: S,
    screenshot_dir: PathBuf,
    rng: R,
}

impl<M: MouseControl, S: ScreenCapture> GestureActions<M, S> {
    /// Create an action dispatcher writing screenshots into `screenshot_dir`
    pub fn new(mouse: M, capture: S, screenshot_dir: impl Into<PathBuf>) -> Self {
        Self::with_rng(mouse, capture, screenshot_dir, rand::thread_rng())
    }
}

impl<M: MouseControl, S: ScreenCapture, R: Rng> GestureActions<M, S, R> {
    /// Create an action dispatcher with an explicit random source for labels
    pub fn with_rng(mouse: M, capture: S, screenshot_dir: impl Into<PathBuf>, rng: R) -> Self {
        Self {
            mouse,
            capture,
            screenshot_dir: screenshot_dir.into(),
            rng,
        }
    }

    /// Mouse collaborator
    pub fn mouse(&self) -> &M {
        &self.mouse
    }

    /// Screen capture collaborator
    pub fn capture(&self) -> &S {
        &self.capture
    }

    /// Perform the side effect of `decision` and return its overlay
    ///
    /// # Errors
    ///
    /// Propagates any mouse or screen capture failure.
    pub fn perform(&mut self, decision: &GestureDecision) -> Result<Option<Overlay>> {
        match decision.gesture {
            Gesture::Move => {
                if let Some(target) = decision.cursor_target {
                    self.mouse.move_to(target.x, target.y)?;
                } else {
                    debug!("Move gesture without a fingertip, cursor left in place");
                }
            }
            Gesture::LeftClick => self.click(MouseButton::Left)?,
            Gesture::RightClick => self.click(MouseButton::Right)?,
            Gesture::DoubleClick => self.mouse.double_click()?,
            Gesture::Screenshot => {
                let path = next_screenshot_path(&self.screenshot_dir, &mut self.rng);
                self.capture.save_screenshot(&path)?;
            }
            Gesture::None => return Ok(None),
        }

        if decision.gesture != Gesture::Move {
            info!("Gesture: {}", decision.gesture);
        }
        Ok(Overlay::for_gesture(decision.gesture))
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        self.mouse.press(button)?;
        self.mouse.release(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_for_gesture() {
        let overlay = Overlay::for_gesture(Gesture::LeftClick).unwrap();
        assert_eq!(overlay.text, "Left Click");
        assert_eq!(overlay.color, (0.0, 255.0, 0.0));

        assert!(Overlay::for_gesture(Gesture::Move).is_none());
        assert!(Overlay::for_gesture(Gesture::None).is_none());
    }
}
