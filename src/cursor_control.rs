//! Mouse control for X11-based systems.
//!
//! Cursor moves use `WarpPointer` on the root window. Button presses are
//! synthesized through the XTEST extension so applications receive them as
//! real input.

use crate::{
    error::{Error, Result},
    gesture::ScreenGeometry,
    utils::safe_cast::i32_to_i16_saturating,
};
use log::{debug, info, warn};
use x11rb::{
    connection::{Connection, RequestConnection},
    protocol::{
        xproto::{ConnectionExt as _, Screen, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT},
        xtest::{self, ConnectionExt as _},
    },
    rust_connection::RustConnection,
};

/// Mouse buttons a gesture can press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// X11 core button number
    #[must_use]
    pub const fn x11_detail(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Middle => 2,
            Self::Right => 3,
        }
    }
}

/// Mouse operations the gesture actions rely on
pub trait MouseControl {
    /// Size of the screen the cursor moves on
    fn screen_geometry(&self) -> ScreenGeometry;

    /// Place the cursor at an absolute screen position
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;

    /// Hold a button down
    fn press(&mut self, button: MouseButton) -> Result<()>;

    /// Let a button go
    fn release(&mut self, button: MouseButton) -> Result<()>;

    /// Two left clicks in quick succession
    fn double_click(&mut self) -> Result<()> {
        for _ in 0..2 {
            self.press(MouseButton::Left)?;
            self.release(MouseButton::Left)?;
        }
        Ok(())
    }
}

/// Mouse control implementation for X11
pub struct X11CursorController {
    connection: RustConnection,
    screen: Screen,
    has_xtest: bool,
}

impl X11CursorController {
    /// Connect to the X server named by `DISPLAY`
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails or the screen is missing.
    pub fn new() -> Result<Self> {
        info!("Initializing X11 cursor controller");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| Error::CursorControl(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| Error::CursorControl("Failed to get screen".to_string()))?
            .clone();

        let has_xtest = connection
            .extension_information(xtest::X11_EXTENSION_NAME)
            .map_err(|e| Error::X11(format!("Failed to query XTEST: {e}")))?
            .is_some();
        if !has_xtest {
            warn!("XTEST extension not available, clicks will fail");
        }

        info!(
            "Connected to X11 display, screen: {}x{}",
            screen.width_in_pixels, screen.height_in_pixels
        );

        Ok(Self {
            connection,
            screen,
            has_xtest,
        })
    }

    fn fake_button(&self, event_type: u8, button: MouseButton) -> Result<()> {
        if !self.has_xtest {
            return Err(Error::CursorControl(
                "XTEST extension is required for button events".to_string(),
            ));
        }

        self.connection
            .xtest_fake_input(event_type, button.x11_detail(), x11rb::CURRENT_TIME, self.screen.root, 0, 0, 0)
            .map_err(|e| Error::CursorControl(format!("Failed to send button event: {e}")))?;

        self.connection
            .flush()
            .map_err(|e| Error::CursorControl(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }
}

impl MouseControl for X11CursorController {
    fn screen_geometry(&self) -> ScreenGeometry {
        ScreenGeometry::new(
            u32::from(self.screen.width_in_pixels),
            u32::from(self.screen.height_in_pixels),
        )
    }

    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        let max_x = i32::from(self.screen.width_in_pixels.saturating_sub(1));
        let max_y = i32::from(self.screen.height_in_pixels.saturating_sub(1));
        let x = i32_to_i16_saturating(x.clamp(0, max_x));
        let y = i32_to_i16_saturating(y.clamp(0, max_y));

        debug!("Setting cursor position to ({}, {})", x, y);

        self.connection
            .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| Error::CursorControl(format!("Failed to warp pointer: {e}")))?;

        self.connection
            .flush()
            .map_err(|e| Error::CursorControl(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }

    fn press(&mut self, button: MouseButton) -> Result<()> {
        debug!("Pressing {:?} button", button);
        self.fake_button(BUTTON_PRESS_EVENT, button)
    }

    fn release(&mut self, button: MouseButton) -> Result<()> {
        debug!("Releasing {:?} button", button);
        self.fake_button(BUTTON_RELEASE_EVENT, button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires X11 display
    fn test_cursor_controller_creation() {
        let controller = X11CursorController::new();
        assert!(controller.is_ok() || controller.is_err());
    }

    #[test]
    fn test_button_numbers() {
        assert_eq!(MouseButton::Left.x11_detail(), 1);
        assert_eq!(MouseButton::Middle.x11_detail(), 2);
        assert_eq!(MouseButton::Right.x11_detail(), 3);
    }

    #[derive(Default)]
    struct ButtonLog(Vec<(MouseButton, bool)>);

    impl MouseControl for ButtonLog {
        fn screen_geometry(&self) -> ScreenGeometry {
            ScreenGeometry::new(800, 600)
        }

        fn move_to(&mut self, _x: i32, _y: i32) -> Result<()> {
            Ok(())
        }

        fn press(&mut self, button: MouseButton) -> Result<()> {
            self.0.push((button, true));
            Ok(())
        }

        fn release(&mut self, button: MouseButton) -> Result<()> {
            self.0.push((button, false));
            Ok(())
        }
    }

    #[test]
    fn test_default_double_click() {
        let mut mouse = ButtonLog::default();
        mouse.double_click().unwrap();

        assert_eq!(
            mouse.0,
            vec![
                (MouseButton::Left, true),
                (MouseButton::Left, false),
                (MouseButton::Left, true),
                (MouseButton::Left, false),
            ]
        );
    }
}
