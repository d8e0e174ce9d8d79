use crate::{
    config::DetectorConfig,
    constants::{DEFAULT_HAND_MODEL_INPUT_SIZE, LANDMARK_COORDS, NUM_HAND_LANDMARKS, TRACKING_ROI_SCALE},
    landmarks::{HandLandmark, Landmark},
    utils::{image_conversion::rgb_to_nhwc_tensor, landmark_roi},
    Error, Result,
};
use log::debug;
use ndarray::CowArray;
use opencv::core::{self, Mat, Rect, Scalar, BORDER_CONSTANT};
use opencv::prelude::*;
use ort::{Environment, Session, Value};
use std::sync::Arc;

/// One hand found in a frame
#[derive(Debug, Clone)]
pub struct HandDetection {
    /// 21 landmarks in normalized frame coordinates
    pub landmarks: Vec<Landmark>,
    /// Hand presence score (0.0-1.0)
    pub score: f32,
}

impl HandDetection {
    /// Tip of the index finger, used to steer the cursor
    #[must_use]
    pub fn index_finger_tip(&self) -> Option<Landmark> {
        HandLandmark::IndexFingerTip.get(&self.landmarks)
    }
}

/// Source of hand landmarks for a frame
pub trait HandDetector {
    /// Find at most one hand in an RGB frame
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails. A frame without a hand is
    /// `Ok(None)`.
    fn detect(&mut self, rgb_frame: &Mat) -> Result<Option<HandDetection>>;
}

/// Hand landmark detector using `ONNX` Runtime
///
/// The model takes a square NHWC RGB crop scaled to `[0, 1]` and returns 21
/// `(x, y, z)` landmarks in crop pixels plus a hand presence score. Unless
/// `static_image_mode` is set, the region around the last hand is reused for
/// the next frame and a hand is kept while its score stays above the tracking
/// confidence. Otherwise the whole frame is letterboxed into a square.
pub struct OnnxHandDetector {
    session: Session,
    input_size: i32,
    options: DetectorConfig,
    tracked_roi: Option<Rect>,
}

impl OnnxHandDetector {
    /// Create a new hand detector from the model selected by `options`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The ONNX model file cannot be loaded
    /// - The ONNX runtime environment cannot be created
    /// - The model has no inputs
    pub fn new(options: DetectorConfig) -> Result<Self> {
        let model_path = options.model_path().to_path_buf();
        log::info!("Initializing hand detector with model: {}", model_path.display());

        let environment = Arc::new(
            Environment::builder()
                .with_name("hand_detector")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(&model_path)?;

        let input_meta = session
            .inputs
            .first()
            .ok_or_else(|| Error::ModelError("Model has no inputs".to_string()))?;

        // Input is [batch, height, width, channels]
        let input_size = if input_meta.dimensions.len() >= 4 {
            input_meta.dimensions[1]
                .map(|d| d as i32)
                .filter(|&d| d > 0)
                .unwrap_or(DEFAULT_HAND_MODEL_INPUT_SIZE)
        } else {
            DEFAULT_HAND_MODEL_INPUT_SIZE
        };
        debug!("Hand model input size: {input_size}");

        Ok(Self {
            session,
            input_size,
            options,
            tracked_roi: None,
        })
    }

    /// Forget the tracked hand region
    pub fn reset(&mut self) {
        self.tracked_roi = None;
    }

    fn detect_in_region(&self, frame: &Mat, roi: Rect, threshold: f32) -> Result<Option<HandDetection>> {
        let crop = Mat::roi(frame, roi)?.try_clone()?;
        let (raw, score) = self.forward(&crop)?;
        if score < threshold {
            return Ok(None);
        }
        let landmarks = project(&raw, self.input_size, roi, frame.cols(), frame.rows());
        Ok(Some(HandDetection { landmarks, score }))
    }

    fn detect_full_frame(&self, frame: &Mat) -> Result<Option<HandDetection>> {
        let (cols, rows) = (frame.cols(), frame.rows());
        let side = cols.max(rows);

        let mut padded = Mat::default();
        core::copy_make_border(
            frame,
            &mut padded,
            0,
            side - rows,
            0,
            side - cols,
            BORDER_CONSTANT,
            Scalar::all(0.0),
        )?;

        let (raw, score) = self.forward(&padded)?;
        if score < self.options.min_detection_confidence {
            return Ok(None);
        }
        let landmarks = project(&raw, self.input_size, Rect::new(0, 0, side, side), cols, rows);
        Ok(Some(HandDetection { landmarks, score }))
    }

    /// Run the model and split its outputs into landmarks and presence score
    fn forward(&self, image: &Mat) -> Result<(Vec<f32>, f32)> {
        let input = rgb_to_nhwc_tensor(image, self.input_size)?;
        let cow_array = CowArray::from(input.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;

        let mut landmarks = None;
        let mut presence = None;
        for output in &outputs {
            let tensor = output.try_extract::<f32>()?;
            let data: Vec<f32> = tensor.view().iter().copied().collect();
            match data.len() {
                n if n == NUM_HAND_LANDMARKS * LANDMARK_COORDS && landmarks.is_none() => landmarks = Some(data),
                1 if presence.is_none() => presence = Some(data[0]),
                _ => {}
            }
        }

        let landmarks =
            landmarks.ok_or_else(|| Error::ModelOutputError("Model produced no landmark tensor".to_string()))?;
        let presence =
            presence.ok_or_else(|| Error::ModelOutputError("Model produced no hand presence score".to_string()))?;

        Ok((landmarks, presence_probability(presence, self.options.presence_is_logit)))
    }
}

impl HandDetector for OnnxHandDetector {
    fn detect(&mut self, rgb_frame: &Mat) -> Result<Option<HandDetection>> {
        let (cols, rows) = (rgb_frame.cols(), rgb_frame.rows());
        if rgb_frame.empty() || cols <= 0 || rows <= 0 {
            return Err(Error::InvalidInput("Cannot detect hands in an empty frame".to_string()));
        }

        if !self.options.static_image_mode {
            if let Some(roi) = self.tracked_roi.take() {
                if let Some(hand) = self.detect_in_region(rgb_frame, roi, self.options.min_tracking_confidence)? {
                    self.tracked_roi = landmark_roi(&hand.landmarks, cols, rows, TRACKING_ROI_SCALE);
                    return Ok(Some(hand));
                }
                debug!("Lost hand track, searching the full frame");
            }
        }

        let hand = self.detect_full_frame(rgb_frame)?;
        if !self.options.static_image_mode {
            self.tracked_roi = hand
                .as_ref()
                .and_then(|h| landmark_roi(&h.landmarks, cols, rows, TRACKING_ROI_SCALE));
        }

        Ok(hand)
    }
}

/// Map crop-pixel landmarks back to normalized frame coordinates
///
/// `raw` holds `(x, y, z)` triples in the model's `input_size` square, which
/// covers `roi` of a `frame_width` x `frame_height` frame.
fn project(raw: &[f32], input_size: i32, roi: Rect, frame_width: i32, frame_height: i32) -> Vec<Landmark> {
    let input = f64::from(input_size);
    raw.chunks_exact(LANDMARK_COORDS)
        .take(NUM_HAND_LANDMARKS)
        .map(|point| {
            let x = f64::from(roi.x) + f64::from(point[0]) / input * f64::from(roi.width);
            let y = f64::from(roi.y) + f64::from(point[1]) / input * f64::from(roi.height);
            Landmark::new(x / f64::from(frame_width), y / f64::from(frame_height))
        })
        .collect()
}

/// Presence output as a probability, applying the sigmoid to logit exports
fn presence_probability(value: f32, is_logit: bool) -> f32 {
    if is_logit {
        1.0 / (1.0 + (-value).exp())
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_probability() {
        assert!((presence_probability(0.9, false) - 0.9).abs() < f32::EPSILON);
        assert!(presence_probability(8.0, true) > 0.99);
        assert!(presence_probability(-8.0, true) < 0.01);
    }

    #[test]
    fn test_small_logit_is_not_taken_as_probability() {
        // A logit inside [0, 1] still goes through the sigmoid
        let p = presence_probability(0.5, true);
        assert!((p - 0.622_459_3).abs() < 1e-5, "got {p}");
        assert!((presence_probability(0.0, true) - 0.5).abs() < f32::EPSILON);
    }

    fn raw_point(x: f32, y: f32) -> Vec<f32> {
        let mut raw = vec![0.0; NUM_HAND_LANDMARKS * LANDMARK_COORDS];
        raw[0] = x;
        raw[1] = y;
        raw
    }

    #[test]
    fn test_project_letterboxed_frame() {
        // 640x480 frame padded to 640x640 at the bottom
        let raw = raw_point(112.0, 112.0);
        let landmarks = project(&raw, 224, Rect::new(0, 0, 640, 640), 640, 480);

        assert_eq!(landmarks.len(), NUM_HAND_LANDMARKS);
        assert!((landmarks[0].x - 0.5).abs() < 1e-9);
        assert!((landmarks[0].y - 320.0 / 480.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_tracking_region() {
        let raw = raw_point(224.0, 0.0);
        let landmarks = project(&raw, 224, Rect::new(100, 50, 200, 200), 640, 480);

        assert!((landmarks[0].x - 300.0 / 640.0).abs() < 1e-9);
        assert!((landmarks[0].y - 50.0 / 480.0).abs() < 1e-9);
        assert!((landmarks[1].x - 100.0 / 640.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_ignores_trailing_values() {
        let mut raw = raw_point(0.0, 0.0);
        raw.extend([1.0, 2.0]);
        let landmarks = project(&raw, 224, Rect::new(0, 0, 224, 224), 224, 224);
        assert_eq!(landmarks.len(), NUM_HAND_LANDMARKS);
    }

    #[test]
    fn test_index_finger_tip() {
        let mut landmarks = vec![Landmark::default(); NUM_HAND_LANDMARKS];
        landmarks[8] = Landmark::new(0.25, 0.75);
        let hand = HandDetection { landmarks, score: 0.9 };
        assert_eq!(hand.index_finger_tip(), Some(Landmark::new(0.25, 0.75)));

        let empty = HandDetection { landmarks: Vec::new(), score: 0.0 };
        assert_eq!(empty.index_finger_tip(), None);
    }

    #[test]
    fn test_output_layout() {
        assert_eq!(NUM_HAND_LANDMARKS * LANDMARK_COORDS, 63);
        assert_eq!(DEFAULT_HAND_MODEL_INPUT_SIZE, 224);
    }
}
