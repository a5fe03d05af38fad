//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the four operations the thumbnail
//! pipeline needs from a pixel codec: decode, dimensions, compose (resize +
//! place on a canvas), and JPEG encode. Geometry never lives here; the
//! backend executes a [`FrameParams`] it is handed.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use super::params::{FrameParams, Quality};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Frame {width}x{height} exceeds the {limit} pixel limit")]
    FrameTooLarge { width: u32, height: u32, limit: u64 },
}

/// Pixel dimensions of a decoded source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for pixel codec backends.
///
/// `Image` is whatever in-memory representation the backend decodes into;
/// the pipeline only moves it between calls.
pub trait ImageBackend: Sync {
    type Image;

    /// Decode encoded bytes (format sniffed from content).
    fn decode(&self, data: &[u8]) -> Result<Self::Image, BackendError>;

    /// Real pixel dimensions of a decoded image.
    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Resize to the planned size and place it on a filled canvas.
    fn compose(&self, image: Self::Image, params: &FrameParams)
    -> Result<Self::Image, BackendError>;

    /// Encode as baseline JPEG.
    fn encode_jpeg(&self, image: &Self::Image, quality: Quality) -> Result<Vec<u8>, BackendError>;
}
