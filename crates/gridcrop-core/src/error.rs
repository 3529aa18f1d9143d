//! Error types for gridcrop-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// gridcrop-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Unsupported number of samples per pixel
    #[error("invalid samples per pixel: {0} (expected at least 3)")]
    InvalidSpp(u32),

    /// Pixel buffer is shorter than its declared geometry requires
    #[error("pixel buffer too small: need {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: ({x}, {y}) outside {width}x{height}")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// A rectangle does not lie within the image
    #[error("region {x},{y} {w}x{h} does not fit in {width}x{height} image")]
    RegionOutsideImage {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        width: u32,
        height: u32,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for gridcrop-core operations
pub type Result<T> = std::result::Result<T, Error>;
