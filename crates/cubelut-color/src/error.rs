//! Error types for the color pipeline.

use thiserror::Error;

/// Pipeline input error.
///
/// The pipeline only handles 8-bit RGB; callers convert other layouts
/// (gray, RGBA, CMYK) before handing images over.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Image is not 3-channel RGB.
    #[error("expected 3 channels (RGB), got {0}")]
    ChannelCount(u32),

    /// Sample buffer length does not match the dimensions.
    #[error("buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSize {
        /// `width * height * 3`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
}

/// Result type for pipeline operations.
pub type TransformResult<T> = Result<T, TransformError>;
