//! Error types for the hand gesture mouse library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[error("OpenCV error: {0}")]
    OpenCV(#[from] opencv::Error),

    /// `ONNX` Runtime inference failed
    #[error("ONNX Runtime error: {0}")]
    OnnxRuntime(#[from] ort::OrtError),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding failed
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// `X11` window system operation failed
    #[error("X11 error: {0}")]
    X11(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model loading or inference error
    #[error("Model error: {0}")]
    ModelError(String),

    /// Model output processing error
    #[error("Model output error: {0}")]
    ModelOutputError(String),

    /// Model data shape or format error
    #[error("Model data format error: {0}")]
    ModelDataFormatError(String),

    /// Cursor control operation failed
    #[error("Cursor control error: {0}")]
    CursorControl(String),

    /// Screen capture or screenshot persistence failed
    #[error("Screenshot error: {0}")]
    Screenshot(String),

    /// The camera stopped delivering frames
    #[error("Frame read error: {0}")]
    FrameRead(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
