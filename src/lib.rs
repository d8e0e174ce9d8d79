//! Hand gesture mouse control from a webcam feed.
//!
//! This library turns the 21 hand landmarks of a tracked hand into mouse
//! actions:
//! - ONNX Runtime for hand landmark inference
//! - `OpenCV` for capture, display and overlays
//! - X11 (with XTEST) for cursor moves, clicks and screenshots
//!
//! Every frame goes through the same steps:
//! 1. Hand landmark detection on the mirrored RGB frame
//! 2. Measurement of the thumb-index distance and two finger curl angles
//! 3. Classification into exactly one gesture
//! 4. The gesture's mouse or screenshot action
//!
//! # Examples
//!
//! ## Classifying Landmarks
//!
//! ```
//! use hand_gesture_mouse::{
//!     gesture::{Gesture, GestureClassifier, ScreenGeometry},
//!     landmarks::Landmark,
//! };
//!
//! let classifier = GestureClassifier::new(ScreenGeometry::new(1920, 1080));
//!
//! // No hand in view
//! let decision = classifier.classify(&[], None);
//! assert_eq!(decision.gesture, Gesture::None);
//!
//! // A hand with every joint in one place has no extended finger
//! let hand = vec![Landmark::new(0.5, 0.5); 21];
//! let decision = classifier.classify(&hand, Some(hand[8]));
//! assert_eq!(decision.gesture, Gesture::Screenshot);
//! ```
//!
//! ## Geometry Primitives
//!
//! ```
//! use hand_gesture_mouse::{geometry::{calculate_angle, calculate_distance}, landmarks::Landmark};
//!
//! let a = Landmark::new(1.0, 0.0);
//! let b = Landmark::new(0.0, 0.0);
//! let c = Landmark::new(0.0, 1.0);
//! assert!((calculate_angle(a, b, c) - 90.0).abs() < 1e-9);
//!
//! assert_eq!(calculate_distance(&[a, b]), Some(1000.0));
//! assert_eq!(calculate_distance(&[a]), None);
//! ```
//!
//! ## Complete Pipeline
//!
//! ```no_run
//! use hand_gesture_mouse::{app::GestureMouseApp, config::Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = GestureMouseApp::new(Config::default())?;
//! app.run()?;
//! # Ok(())
//! # }
//! ```

/// Landmark points and hand topology
pub mod landmarks;

/// Angle and distance primitives
pub mod geometry;

/// Gesture rule engine
pub mod gesture;

/// Mouse and screenshot side effects of gestures
pub mod actions;

/// Hand landmark detection with ONNX Runtime
pub mod hand_detection;

/// Cursor control module for X11 systems
pub mod cursor_control;

/// Full-screen capture for X11 systems
pub mod screenshot;

/// Frame annotations
pub mod overlay;

/// Utility functions for image processing and coordinate transformations
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
