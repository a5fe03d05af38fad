//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which plans the frame) and the [`backend`](super::backend) (which does
//! the actual pixel work). This separation allows swapping backends (e.g. for
//! testing with a mock) without changing operation logic.
//!
//! ## Types
//!
//! - [`Quality`] — JPEG encoding quality (1–100, default 100). Clamped on construction.
//! - [`Background`] — Canvas fill colour for the letterbox area (default opaque black).
//! - [`ResampleFilter`] — Resize kernel selection.
//! - [`FrameParams`] — Full specification for one frame: canvas size, fit plan, fill, filter.

use super::calculations::FitPlan;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(100)
    }
}

/// Opaque RGB fill for canvas area not covered by the resized image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Background(pub [u8; 3]);

impl Background {
    pub fn rgb(self) -> [u8; 3] {
        self.0
    }
}

impl FromStr for Background {
    type Err = String;

    /// Parses `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("background must start with '#': {s}"))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("background must be #rrggbb: {s}"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| format!("background has invalid hex digits: {s}"))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for Background {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Background {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Resampling kernel used when shrinking the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    /// Cubic; the closest available kernel to a B-spline.
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

/// Parameters for composing one framed thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameParams {
    /// Final canvas dimensions.
    pub width: u32,
    pub height: u32,
    pub plan: FitPlan,
    pub background: Background,
    pub filter: ResampleFilter,
}
