//! # Thumbframe
//!
//! A single-endpoint image thumbnailer. Given a source image reference and a
//! target box, it produces a JPEG of exactly that size: the source is scaled
//! down (never up) to fit inside the box without distortion, centred, and the
//! rest of the box is filled with a solid background.
//!
//! ```text
//! GET /thumbnail?url=<ref>&width=<int>&height=<int>
//!
//! 1. Validate   raw params  →  ThumbnailCommand    (first failure wins)
//! 2. Fetch      url         →  encoded bytes        (file:/// or HTTP)
//! 3. Plan       dimensions  →  FitPlan              (pure geometry)
//! 4. Render     bytes+plan  →  framed JPEG          (image crate)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`request`] | Query parsing and the ordered validation cascade |
//! | [`imaging`] | Fit geometry, codec backend trait, `image`-crate backend |
//! | [`source`] | `file:///` vs remote references and the blocking fetcher |
//! | [`service`] | One request end to end, mapped to status + body |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Letterbox, Not Fill
//!
//! The frame policy is contain-fit with padding. Nothing in the source is
//! ever cropped, and a box larger than the source yields bars rather than an
//! enlarged image. Offsets use truncating division, so an odd remainder puts
//! the extra pixel on the right or bottom edge.
//!
//! ## Geometry Without Pixels
//!
//! [`imaging::plan_fit`] takes dimensions and returns a [`imaging::FitPlan`];
//! it never sees an image. The scale factor is an exact fraction, so the
//! constraining edge always lands on the box size instead of one pixel short.
//! The backend executes the plan and nothing else.
//!
//! ## Strict Sizes
//!
//! `width` and `height` must be positive integers. Zero and negative values
//! are both rejected during validation, so the geometry can assume a
//! non-empty box.

pub mod config;
pub mod imaging;
pub mod output;
pub mod request;
pub mod service;
pub mod source;
