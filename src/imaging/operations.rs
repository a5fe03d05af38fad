//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take a validated command and render settings, compute the frame,
//! and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{FitPlan, plan_fit};
use super::params::{Background, FrameParams, Quality, ResampleFilter};
use crate::request::ThumbnailCommand;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Largest canvas rendered by default, in pixels (50 megapixels).
pub const DEFAULT_MAX_PIXELS: u64 = 50_000_000;

/// Rendering settings shared by every request.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub quality: Quality,
    pub background: Background,
    pub filter: ResampleFilter,
    /// Upper bound on `width × height` of the output canvas.
    pub max_pixels: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            background: Background::default(),
            filter: ResampleFilter::default(),
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// An encoded thumbnail plus the plan that produced it.
#[derive(Debug, Clone)]
pub struct RenderedThumbnail {
    pub jpeg: Vec<u8>,
    pub source: Dimensions,
    pub plan: FitPlan,
}

/// Reject a requested canvas larger than `config.max_pixels`.
///
/// Needs no image data, so callers can run it before fetching.
pub fn check_frame(command: &ThumbnailCommand, config: &RenderConfig) -> Result<()> {
    let pixels = u64::from(command.width) * u64::from(command.height);
    if pixels > config.max_pixels {
        return Err(BackendError::FrameTooLarge {
            width: command.width,
            height: command.height,
            limit: config.max_pixels,
        });
    }
    Ok(())
}

/// Plan a frame without executing it.
///
/// Rejects oversized canvases and zero-sized sources here so neither the
/// geometry nor the backend ever sees them.
pub fn plan_frame(
    source: Dimensions,
    command: &ThumbnailCommand,
    config: &RenderConfig,
) -> Result<FrameParams> {
    check_frame(command, config)?;
    if source.width == 0 || source.height == 0 {
        return Err(BackendError::Decode(format!(
            "source has zero dimension: {}x{}",
            source.width, source.height
        )));
    }

    Ok(FrameParams {
        width: command.width,
        height: command.height,
        plan: plan_fit(source, command.width, command.height),
        background: config.background,
        filter: config.filter,
    })
}

/// Decode, frame and encode one thumbnail.
///
/// Decode runs first so the plan is always computed from real dimensions.
pub fn render_thumbnail<B: ImageBackend>(
    backend: &B,
    data: &[u8],
    command: &ThumbnailCommand,
    config: &RenderConfig,
) -> Result<RenderedThumbnail> {
    let image = backend.decode(data)?;
    let source = backend.dimensions(&image);
    let params = plan_frame(source, command, config)?;

    let framed = backend.compose(image, &params)?;
    let jpeg = backend.encode_jpeg(&framed, config.quality)?;

    Ok(RenderedThumbnail {
        jpeg,
        source,
        plan: params.plan,
    })
}
