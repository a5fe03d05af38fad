//! Image processing — geometry plus an `image`-crate codec backend.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Fit plan** | [`plan_fit`] (pure integer geometry) |
//! | **Decode** | `image::load_from_memory` |
//! | **Resize + letterbox** | `imageops::resize` + `imageops::overlay` on a filled canvas |
//! | **Encode** | `JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for fit geometry (unit testable)
//! - **Parameters**: Data structures describing a frame
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{FitPlan, ScaleRatio, plan_fit};
pub use operations::{
    DEFAULT_MAX_PIXELS, RenderConfig, RenderedThumbnail, check_frame, plan_frame, render_thumbnail,
};
pub use params::{Background, FrameParams, Quality, ResampleFilter};
pub use rust_backend::RustBackend;
