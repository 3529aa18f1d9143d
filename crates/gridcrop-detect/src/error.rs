//! Error types for gridcrop-detect

use thiserror::Error;

/// Errors that can occur during grid detection
///
/// An inconclusive detection is not an error: it resolves to the
/// fallback rectangle. Only unusable input and bad configuration are
/// reported here.
#[derive(Debug, Error)]
pub enum DetectError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] gridcrop_core::Error),

    /// The image has no pixels
    #[error("empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration JSON could not be parsed
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for detection operations
pub type DetectResult<T> = Result<T, DetectError>;
