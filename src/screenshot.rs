//! Full-screen capture and screenshot file naming.

use crate::{
    constants::{SCREENSHOT_LABEL_MAX, SCREENSHOT_LABEL_MIN, SCREENSHOT_PREFIX},
    error::{Error, Result},
};
use image::RgbImage;
use log::{info, warn};
use rand::Rng;
use std::path::{Path, PathBuf};
use x11rb::{
    connection::Connection,
    protocol::xproto::{ConnectionExt as _, ImageFormat, ImageOrder, Screen},
    rust_connection::RustConnection,
};

/// Random labels tried before accepting an existing file name
const MAX_NAME_ATTEMPTS: usize = 32;

/// Something that can write the current screen contents to a file
pub trait ScreenCapture {
    /// Capture the whole screen and save it as an image at `path`
    fn save_screenshot(&mut self, path: &Path) -> Result<()>;
}

/// File name for a screenshot with the given label
#[must_use]
pub fn screenshot_file_name(label: u32) -> String {
    format!("{SCREENSHOT_PREFIX}{label}.png")
}

/// Pick a path `my_screenshot_<label>.png` in `directory`
///
/// Labels are drawn uniformly from 1 to 1000. A label whose file already
/// exists is redrawn a bounded number of times; after that the last draw is
/// used and the old file is overwritten.
pub fn next_screenshot_path<R: Rng + ?Sized>(directory: &Path, rng: &mut R) -> PathBuf {
    let mut path = PathBuf::new();
    for _ in 0..MAX_NAME_ATTEMPTS {
        let label = rng.gen_range(SCREENSHOT_LABEL_MIN..=SCREENSHOT_LABEL_MAX);
        path = directory.join(screenshot_file_name(label));
        if !path.exists() {
            return path;
        }
    }
    warn!("No free screenshot name found, overwriting {}", path.display());
    path
}

/// Screen grabber reading the X11 root window
pub struct X11ScreenGrabber {
    connection: RustConnection,
    screen: Screen,
}

impl X11ScreenGrabber {
    /// Connect to the X server named by `DISPLAY`
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails or the screen is missing.
    pub fn new() -> Result<Self> {
        let (connection, screen_num) =
            RustConnection::connect(None).map_err(|e| Error::X11(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| Error::X11("Failed to get screen".to_string()))?
            .clone();

        Ok(Self { connection, screen })
    }

    /// Read the root window into an RGB image
    fn grab(&self) -> Result<RgbImage> {
        let width = self.screen.width_in_pixels;
        let height = self.screen.height_in_pixels;

        let reply = self
            .connection
            .get_image(ImageFormat::Z_PIXMAP, self.screen.root, 0, 0, width, height, !0)
            .map_err(|e| Error::Screenshot(format!("Failed to request screen image: {e}")))?
            .reply()
            .map_err(|e| Error::Screenshot(format!("Failed to read screen image: {e}")))?;

        let setup = self.connection.setup();
        let bits_per_pixel = setup
            .pixmap_formats
            .iter()
            .find(|format| format.depth == reply.depth)
            .map(|format| format.bits_per_pixel)
            .ok_or_else(|| Error::Screenshot(format!("No pixmap format for depth {}", reply.depth)))?;

        pixels_to_rgb(
            &reply.data,
            u32::from(width),
            u32::from(height),
            bits_per_pixel,
            setup.image_byte_order == ImageOrder::LSB_FIRST,
        )
    }
}

impl ScreenCapture for X11ScreenGrabber {
    fn save_screenshot(&mut self, path: &Path) -> Result<()> {
        let image = self.grab()?;
        image.save(path)?;
        info!("Saved screenshot to {}", path.display());
        Ok(())
    }
}

/// Convert 32-bit TrueColor ZPixmap data to RGB
///
/// With LSB-first byte order the bytes of a pixel are `B G R X`, otherwise
/// `X R G B`.
fn pixels_to_rgb(data: &[u8], width: u32, height: u32, bits_per_pixel: u8, lsb_first: bool) -> Result<RgbImage> {
    if bits_per_pixel != 32 {
        return Err(Error::Screenshot(format!(
            "Unsupported screen format: {bits_per_pixel} bits per pixel"
        )));
    }

    let pixel_count = width as usize * height as usize;
    if data.len() < pixel_count * 4 {
        return Err(Error::Screenshot(format!(
            "Screen image too short: {} bytes for {width}x{height}",
            data.len()
        )));
    }

    let mut rgb = Vec::with_capacity(pixel_count * 3);
    for pixel in data.chunks_exact(4).take(pixel_count) {
        if lsb_first {
            rgb.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
        } else {
            rgb.extend_from_slice(&[pixel[1], pixel[2], pixel[3]]);
        }
    }

    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| Error::Screenshot("Failed to assemble screen image".to_string()))
}
