//! Error handling tests across modules

use hand_gesture_mouse::{
    config::Config,
    error::{Error, Result},
    utils::{landmark_roi, safe_cast::*},
};

#[test]
fn test_safe_cast_errors() {
    assert!(f64_to_i32(f64::NAN).is_err());
    assert!(f64_to_i32(f64::INFINITY).is_err());
    assert!(f64_to_i32(1e12).is_err());
    assert_eq!(f64_to_i32(-3.9).unwrap(), -3);

    match f64_to_i32(f64::NEG_INFINITY) {
        Err(Error::InvalidInput(msg)) => assert!(msg.contains("cannot be safely converted")),
        _ => panic!("Expected InvalidInput"),
    }

    assert_eq!(f32_to_i32_clamp(f32::NAN, 0, 10), 0);
    assert_eq!(i32_to_i16_saturating(100_000), i16::MAX);
}

#[test]
fn test_config_errors() {
    match Config::from_yaml("camera: {index: 'front'}") {
        Err(Error::ConfigError(_)) => {}
        other => panic!("Expected ConfigError, got {other:?}"),
    }

    let mut config = Config::default();
    config.detector.max_num_hands = 2;
    match config.validate_values() {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("hand")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_degenerate_roi_inputs() {
    assert!(landmark_roi(&[], 640, 480, 2.0).is_none());
    assert!(landmark_roi(&[hand_gesture_mouse::landmarks::Landmark::new(0.5, 0.5)], 0, 480, 2.0).is_none());
}

#[test]
fn test_error_display() {
    let err = Error::FrameRead("Camera returned no frame".to_string());
    assert_eq!(err.to_string(), "Frame read error: Camera returned no frame");

    let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_error_propagation() {
    fn inner() -> Result<i32> {
        let value = f64_to_i32(f64::NAN)?;
        Ok(value + 1)
    }

    assert!(inner().is_err());
}
