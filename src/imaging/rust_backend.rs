//! Pure Rust codec backend on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `image::load_from_memory` (format sniffed) |
//! | Resize | `image::imageops::resize` with the configured filter |
//! | Canvas + placement | `RgbImage::from_pixel` + `image::imageops::overlay` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{FrameParams, Quality, ResampleFilter};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageEncoder, Rgb, RgbImage};

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl ImageBackend for RustBackend {
    type Image = DynamicImage;

    fn decode(&self, data: &[u8]) -> Result<DynamicImage, BackendError> {
        let img = image::load_from_memory(data).map_err(|e| BackendError::Decode(e.to_string()))?;
        if img.width() == 0 || img.height() == 0 {
            return Err(BackendError::Decode(format!(
                "image has zero dimension: {}x{}",
                img.width(),
                img.height()
            )));
        }
        Ok(img)
    }

    fn dimensions(&self, image: &DynamicImage) -> Dimensions {
        Dimensions {
            width: image.width(),
            height: image.height(),
        }
    }

    fn compose(
        &self,
        image: DynamicImage,
        params: &FrameParams,
    ) -> Result<DynamicImage, BackendError> {
        if params.width == 0 || params.height == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "canvas must be non-empty: {}x{}",
                params.width, params.height
            )));
        }
        // RgbImage::from_pixel panics when the buffer length overflows usize.
        let canvas_bytes = (params.width as usize)
            .checked_mul(params.height as usize)
            .and_then(|pixels| pixels.checked_mul(3));
        if canvas_bytes.is_none() {
            return Err(BackendError::ProcessingFailed(format!(
                "canvas too large to allocate: {}x{}",
                params.width, params.height
            )));
        }

        let background = Rgb(params.background.rgb());
        let mut canvas = RgbImage::from_pixel(params.width, params.height, background);

        let plan = &params.plan;
        // A zero-width or zero-height resize leaves nothing to place.
        if plan.resized_width > 0 && plan.resized_height > 0 {
            let source = image.to_rgb8();
            let target = (plan.resized_width, plan.resized_height);
            let resized = if source.dimensions() == target {
                source
            } else {
                image::imageops::resize(
                    &source,
                    plan.resized_width,
                    plan.resized_height,
                    params.filter.into(),
                )
            };
            image::imageops::overlay(&mut canvas, &resized, plan.offset_x, plan.offset_y);
        }

        Ok(DynamicImage::ImageRgb8(canvas))
    }

    fn encode_jpeg(&self, image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, BackendError> {
        let rgb = image.to_rgb8();
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, quality.value() as u8)
            .write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| BackendError::Encode(e.to_string()))?;
        Ok(buf)
    }
}
