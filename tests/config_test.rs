//! Tests for configuration loading, saving and validation

use hand_gesture_mouse::{
    config::{Config, EXAMPLE_CONFIG},
    Error,
};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("hand_gesture_mouse_{}_{name}", std::process::id()))
}

#[test]
fn test_save_and_load_roundtrip() {
    let path = temp_path("roundtrip.yaml");
    let mut config = Config::default();
    config.camera.index = 3;
    config.camera.mirror = false;
    config.detector.model_complexity = 0;
    config.display.show_fps = true;

    config.to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.camera.index, 3);
    assert!(!loaded.camera.mirror);
    assert_eq!(loaded.detector.model_complexity, 0);
    assert!(loaded.display.show_fps);
    assert_eq!(loaded.detector.model_path(), loaded.detector.lite_model.as_path());
}

#[test]
fn test_missing_file_is_an_io_error() {
    match Config::from_file(temp_path("does_not_exist.yaml")) {
        Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[test]
fn test_save_into_missing_directory_is_an_io_error() {
    let path = temp_path("no_such_dir").join("config.yaml");
    assert!(matches!(Config::default().to_file(&path), Err(Error::Io(_))));
}

#[test]
fn test_malformed_yaml_is_an_error() {
    let result = Config::from_yaml("camera: [this is not a mapping");
    assert!(result.is_err());
}

#[test]
fn test_example_config_matches_defaults() {
    let example = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
    let defaults = Config::default();

    assert_eq!(example.camera.index, defaults.camera.index);
    assert_eq!(example.camera.mirror, defaults.camera.mirror);
    assert_eq!(example.detector.lite_model, defaults.detector.lite_model);
    assert_eq!(example.detector.full_model, defaults.detector.full_model);
    assert_eq!(example.detector.static_image_mode, defaults.detector.static_image_mode);
    assert_eq!(example.detector.model_complexity, defaults.detector.model_complexity);
    assert_eq!(example.detector.max_num_hands, defaults.detector.max_num_hands);
    assert_eq!(example.detector.presence_is_logit, defaults.detector.presence_is_logit);
    assert_eq!(example.display.window_name, defaults.display.window_name);
    assert_eq!(example.display.draw_skeleton, defaults.display.draw_skeleton);
    assert_eq!(example.screenshot.directory, defaults.screenshot.directory);
}

#[test]
fn test_validate_reports_missing_model() {
    let mut config = Config::default();
    config.detector.full_model = temp_path("missing_model.onnx");

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("Hand landmark model not found"));
}

#[test]
fn test_validate_reports_missing_screenshot_directory() {
    let model = temp_path("model.onnx");
    std::fs::write(&model, b"not a real model").unwrap();

    let mut config = Config::default();
    config.detector.full_model = model.clone();
    config.screenshot.directory = temp_path("no_such_dir");

    let result = config.validate();
    std::fs::remove_file(&model).unwrap();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Screenshot directory does not exist"));
}

#[test]
fn test_validate_value_ranges() {
    let mut config = Config::default();
    config.detector.model_complexity = 2;
    assert!(config.validate_values().is_err());

    let mut config = Config::default();
    config.detector.min_detection_confidence = -0.1;
    assert!(config.validate_values().is_err());

    let mut config = Config::default();
    config.camera.index = -1;
    assert!(config.validate_values().is_err());

    let mut config = Config::default();
    config.display.window_name.clear();
    assert!(config.validate_values().is_err());
}
