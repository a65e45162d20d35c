//! Custom error types for cvutils.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the cvutils library.
#[derive(Error, Debug)]
pub enum Error {
    /// Unsupported conversion mode, or a mode the element type cannot honour.
    #[error("invalid mode {mode:?}: valid modes are 'clip' and 'norm'")]
    InvalidMode { mode: String },

    /// Moving-average window outside `1..=len`.
    #[error("invalid window size {window} for a sequence of length {len}: must be between 1 and {len}")]
    InvalidWindow { window: usize, len: usize },

    /// Path does not exist or is not a directory.
    #[error("directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Failed to load an image file.
    #[error("failed to load image from {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Array cannot be shown as an image.
    #[error("unsupported image shape {shape:?}: {reason}")]
    UnsupportedShape { shape: Vec<usize>, reason: String },

    /// The display window could not be opened.
    #[error("failed to display image: {reason}")]
    Display { reason: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for cvutils operations.
pub type Result<T> = std::result::Result<T, Error>;
