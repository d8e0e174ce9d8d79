//! Main application module: the per-frame capture, classify and act loop.

use crate::{
    actions::{GestureActions, Overlay},
    config::Config,
    constants::QUIT_KEY,
    cursor_control::{MouseControl, X11CursorController},
    error::{Error, Result},
    gesture::{GestureClassifier, GestureDecision},
    hand_detection::{HandDetector, OnnxHandDetector},
    landmarks::Landmark,
    overlay::{draw_fps, draw_label, draw_skeleton},
    screenshot::{ScreenCapture, X11ScreenGrabber},
};
use log::{error, info, warn};
use opencv::{
    core::{self, Mat},
    highgui::{self, WINDOW_AUTOSIZE},
    imgproc,
    prelude::*,
    videoio::{self, VideoCapture},
};
use std::time::{Duration, Instant};

/// Outcome of processing one frame
#[derive(Debug, Clone, Default)]
pub struct FrameResult {
    /// Landmarks of the detected hand, empty when no hand was found
    pub landmarks: Vec<Landmark>,
    /// Classifier verdict
    pub decision: GestureDecision,
    /// Label to draw, if the verdict has one
    pub overlay: Option<Overlay>,
}

/// Detection, classification and dispatch for single frames
///
/// Holds no per-frame gesture state; every call starts from the detector
/// output alone.
pub struct FramePipeline<D, M, S> {
    detector: D,
    classifier: GestureClassifier,
    actions: GestureActions<M, S>,
}

impl<D: HandDetector, M: MouseControl, S: ScreenCapture> FramePipeline<D, M, S> {
    /// Assemble a pipeline; the classifier targets the mouse's screen
    pub fn new(detector: D, mouse: M, capture: S, screenshot_dir: impl Into<std::path::PathBuf>) -> Self {
        let classifier = GestureClassifier::new(mouse.screen_geometry());
        Self {
            detector,
            classifier,
            actions: GestureActions::new(mouse, capture, screenshot_dir),
        }
    }

    /// Action dispatcher, exposing the collaborators
    pub fn actions(&self) -> &GestureActions<M, S> {
        &self.actions
    }

    /// Detect a hand in an RGB frame, classify it and act on the verdict
    ///
    /// # Errors
    ///
    /// Returns an error if detection or an action fails.
    pub fn process(&mut self, rgb_frame: &Mat) -> Result<FrameResult> {
        let hand = self.detector.detect(rgb_frame)?;
        let (landmarks, tip) = match hand {
            Some(hand) => {
                let tip = hand.index_finger_tip();
                (hand.landmarks, tip)
            }
            None => (Vec::new(), None),
        };
        self.process_landmarks(landmarks, tip)
    }

    /// Classify an already extracted landmark list and act on the verdict
    ///
    /// # Errors
    ///
    /// Returns an error if an action fails.
    pub fn process_landmarks(&mut self, landmarks: Vec<Landmark>, index_finger_tip: Option<Landmark>) -> Result<FrameResult> {
        let decision = self.classifier.classify(&landmarks, index_finger_tip);
        let overlay = self.actions.perform(&decision)?;
        Ok(FrameResult {
            landmarks,
            decision,
            overlay,
        })
    }
}

/// Owns the camera and closes it together with any windows when dropped
struct CameraGuard {
    capture: VideoCapture,
    windows: bool,
}

impl Drop for CameraGuard {
    fn drop(&mut self) {
        if let Err(e) = self.capture.release() {
            warn!("Failed to release camera: {}", e);
        }
        if self.windows {
            if let Err(e) = highgui::destroy_all_windows() {
                warn!("Failed to close windows: {}", e);
            }
        }
        info!("Camera released");
    }
}

/// Main application struct
pub struct GestureMouseApp {
    config: Config,
    camera: CameraGuard,
    pipeline: FramePipeline<OnnxHandDetector, X11CursorController, X11ScreenGrabber>,
}

impl GestureMouseApp {
    /// Create the application: open the camera, load the model, connect to X11
    ///
    /// # Errors
    ///
    /// Returns an error if any collaborator cannot be initialized.
    pub fn new(config: Config) -> Result<Self> {
        info!("Initializing hand gesture mouse");

        let detector = OnnxHandDetector::new(config.detector.clone())?;
        let mouse = X11CursorController::new()?;
        let grabber = X11ScreenGrabber::new()?;
        let pipeline = FramePipeline::new(detector, mouse, grabber, config.screenshot.directory.clone());

        info!("Opening camera {}", config.camera.index);
        let capture = VideoCapture::new(config.camera.index, videoio::CAP_ANY)?;
        let mut camera = CameraGuard {
            capture,
            windows: false,
        };
        if !camera.capture.is_opened()? {
            return Err(Error::FrameRead(format!("Failed to open camera {}", config.camera.index)));
        }

        if config.display.show_window {
            highgui::named_window(&config.display.window_name, WINDOW_AUTOSIZE)?;
            camera.windows = true;
        }

        Ok(Self {
            config,
            camera,
            pipeline,
        })
    }

    /// Run the main application loop until `q` is pressed or a frame read fails
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameRead`] when the camera stops delivering frames,
    /// or any error raised while processing a frame.
    pub fn run(&mut self) -> Result<()> {
        info!("Starting main application loop");

        let mut frame_count = 0u32;
        let start_time = Instant::now();
        let mut last_fps_update = Instant::now();
        let mut fps = 0.0;

        loop {
            let mut frame = Mat::default();
            if !self.camera.capture.read(&mut frame)? || frame.empty() {
                error!("Failed to read frame from camera");
                return Err(Error::FrameRead("Camera returned no frame".to_string()));
            }

            if self.config.camera.mirror {
                let temp = frame.clone();
                core::flip(&temp, &mut frame, 1)?;
            }

            let mut rgb_frame = Mat::default();
            imgproc::cvt_color(&frame, &mut rgb_frame, imgproc::COLOR_BGR2RGB, 0)?;

            let result = self.pipeline.process(&rgb_frame)?;

            frame_count += 1;
            if last_fps_update.elapsed() >= Duration::from_secs(1) {
                fps = f64::from(frame_count) / start_time.elapsed().as_secs_f64();
                last_fps_update = Instant::now();
            }

            if !self.config.display.show_window {
                continue;
            }

            self.annotate(&mut frame, &result, fps)?;
            highgui::imshow(&self.config.display.window_name, &frame)?;

            let key = highgui::wait_key(1)?;
            if key & 0xFF == QUIT_KEY {
                info!("Exit requested by user");
                break;
            }
        }

        info!("Application shutting down");
        Ok(())
    }

    fn annotate(&self, frame: &mut Mat, result: &FrameResult, fps: f64) -> Result<()> {
        if self.config.display.draw_skeleton && !result.landmarks.is_empty() {
            draw_skeleton(frame, &result.landmarks)?;
        }
        if let Some(overlay) = &result.overlay {
            draw_label(frame, overlay)?;
        }
        if self.config.display.show_fps {
            draw_fps(frame, fps)?;
        }
        Ok(())
    }
}
