//! Error type for file-level operations

use thiserror::Error;

/// Errors from decoding a page or detecting its grid
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] gridcrop_io::IoError),

    #[error(transparent)]
    Detect(#[from] gridcrop_detect::DetectError),
}

/// Result type for file-level operations
pub type Result<T> = std::result::Result<T, Error>;
