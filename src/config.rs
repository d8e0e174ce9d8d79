//! Configuration management for the hand gesture mouse application
//!
//! Gesture thresholds live in `constants` and are not configurable.

use crate::{
    constants::{
        DEFAULT_MAX_NUM_HANDS, DEFAULT_MIN_DETECTION_CONFIDENCE, DEFAULT_MIN_TRACKING_CONFIDENCE,
        DEFAULT_MODEL_COMPLEXITY, DEFAULT_WINDOW_NAME,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera configuration
    pub camera: CameraConfig,

    /// Hand detector configuration
    pub detector: DetectorConfig,

    /// Display configuration
    pub display: DisplayConfig,

    /// Screenshot configuration
    pub screenshot: ScreenshotConfig,
}

/// Video input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera device index
    pub index: i32,

    /// Mirror frames horizontally before detection
    pub mirror: bool,
}

/// Hand landmark detector options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Model used when `model_complexity` is 0
    pub lite_model: PathBuf,

    /// Model used when `model_complexity` is 1
    pub full_model: PathBuf,

    /// Treat every frame as unrelated (no region tracking)
    pub static_image_mode: bool,

    /// 0 for the lite model, 1 for the full model
    pub model_complexity: u8,

    /// Minimum hand presence score for a fresh detection (0.0-1.0)
    pub min_detection_confidence: f32,

    /// Minimum hand presence score to keep tracking a hand (0.0-1.0)
    pub min_tracking_confidence: f32,

    /// Number of hands to report; only a single hand is supported
    pub max_num_hands: usize,

    /// The model's presence output is a raw logit rather than a probability
    pub presence_is_logit: bool,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the annotated camera window
    pub show_window: bool,

    /// Window title
    pub window_name: String,

    /// Draw the hand skeleton over the frame
    pub draw_skeleton: bool,

    /// Draw the frame rate counter
    pub show_fps: bool,
}

/// Screenshot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    /// Directory screenshots are written to
    pub directory: PathBuf,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { index: 0, mirror: true }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            lite_model: PathBuf::from("assets/hand_landmark_lite.onnx"),
            full_model: PathBuf::from("assets/hand_landmark_full.onnx"),
            static_image_mode: false,
            model_complexity: DEFAULT_MODEL_COMPLEXITY,
            min_detection_confidence: DEFAULT_MIN_DETECTION_CONFIDENCE,
            min_tracking_confidence: DEFAULT_MIN_TRACKING_CONFIDENCE,
            max_num_hands: DEFAULT_MAX_NUM_HANDS,
            presence_is_logit: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_window: true,
            window_name: DEFAULT_WINDOW_NAME.to_string(),
            draw_skeleton: true,
            show_fps: false,
        }
    }
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl DetectorConfig {
    /// Model file selected by `model_complexity`
    #[must_use]
    pub fn model_path(&self) -> &Path {
        if self.model_complexity == 0 {
            &self.lite_model
        } else {
            &self.full_model
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate value ranges without touching the filesystem
    pub fn validate_values(&self) -> Result<()> {
        if self.camera.index < 0 {
            return Err(Error::ConfigError("Camera index must not be negative".to_string()));
        }

        let detector = &self.detector;
        if detector.model_complexity > 1 {
            return Err(Error::ConfigError(format!(
                "Model complexity must be 0 or 1, got {}",
                detector.model_complexity
            )));
        }
        if !(0.0..=1.0).contains(&detector.min_detection_confidence) {
            return Err(Error::ConfigError(
                "Minimum detection confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&detector.min_tracking_confidence) {
            return Err(Error::ConfigError(
                "Minimum tracking confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if detector.max_num_hands != 1 {
            return Err(Error::ConfigError(format!(
                "Only a single hand is supported, got max_num_hands = {}",
                detector.max_num_hands
            )));
        }

        if self.display.window_name.is_empty() {
            return Err(Error::ConfigError("Window name must not be empty".to_string()));
        }

        Ok(())
    }

    /// Validate configuration, including that referenced files exist
    pub fn validate(&self) -> Result<()> {
        self.validate_values()?;

        let model = self.detector.model_path();
        if !model.exists() {
            return Err(Error::ConfigError(format!(
                "Hand landmark model not found: {}",
                model.display()
            )));
        }
        if !self.screenshot.directory.is_dir() {
            return Err(Error::ConfigError(format!(
                "Screenshot directory does not exist: {}",
                self.screenshot.directory.display()
            )));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Gesture Mouse Configuration

# Video input
camera:
  index: 0
  mirror: true

# Hand landmark detector
detector:
  lite_model: "assets/hand_landmark_lite.onnx"
  full_model: "assets/hand_landmark_full.onnx"
  static_image_mode: false
  model_complexity: 1
  min_detection_confidence: 0.8
  min_tracking_confidence: 0.8
  max_num_hands: 1
  # Set when the model export omits the final sigmoid on the presence score
  presence_is_logit: false

# Display settings
display:
  show_window: true
  window_name: "Frame"
  draw_skeleton: true
  show_fps: false

# Screenshots are saved as my_screenshot_<1..1000>.png
screenshot:
  directory: "."
"#;
