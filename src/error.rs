//! Errors raised while writing rendered frames.
//!
//! The rendering core itself cannot fail; only the output stage touches
//! the file system.

use thiserror::Error;

/// Failure to encode or store a frame.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The output path has an extension no encoder handles.
    #[error("unsupported file extension '{0}', only .png and .exr are supported")]
    UnsupportedFormat(String),

    /// Nothing to write: the frame has no pixels.
    #[error("cannot save an empty {width}x{height} image")]
    EmptyImage {
        /// Frame width.
        width: u32,
        /// Frame height.
        height: u32,
    },

    /// PNG encoding or file I/O failed.
    #[error("failed to save PNG: {0}")]
    Image(#[from] image::ImageError),

    /// EXR encoding or file I/O failed.
    #[error("failed to save EXR: {0}")]
    Exr(#[from] exr::error::Error),
}
