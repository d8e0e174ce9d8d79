//! Constants used throughout the application

/// Number of landmarks the hand model reports per hand
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Values per landmark in the model output (x, y, z)
pub const LANDMARK_COORDS: usize = 3;

/// Upper end of the rescaled distance range
pub const DISTANCE_SCALE: f64 = 1000.0;

/// Thumb-index distance separating an open hand from a pinched one
pub const THUMB_INDEX_GATE: f64 = 50.0;

/// Curl angle below which a finger counts as bent
pub const FINGER_BENT_MAX_ANGLE: f64 = 50.0;

/// Curl angle above which a finger counts as extended
pub const FINGER_EXTENDED_MIN_ANGLE: f64 = 90.0;

/// Screenshot labels are drawn from this inclusive range
pub const SCREENSHOT_LABEL_MIN: u32 = 1;
pub const SCREENSHOT_LABEL_MAX: u32 = 1000;

/// Screenshot file name prefix
pub const SCREENSHOT_PREFIX: &str = "my_screenshot_";

/// Default hand detector options
pub const DEFAULT_MODEL_COMPLEXITY: u8 = 1;
pub const DEFAULT_MIN_DETECTION_CONFIDENCE: f32 = 0.8;
pub const DEFAULT_MIN_TRACKING_CONFIDENCE: f32 = 0.8;
pub const DEFAULT_MAX_NUM_HANDS: usize = 1;

/// Default square input size of the hand landmark model
pub const DEFAULT_HAND_MODEL_INPUT_SIZE: i32 = 224;

/// Tracking crop is this many times the landmark bounding box
pub const TRACKING_ROI_SCALE: f32 = 2.0;

/// Default display window title
pub const DEFAULT_WINDOW_NAME: &str = "Frame";

/// Key code that stops the main loop
pub const QUIT_KEY: i32 = b'q' as i32;
