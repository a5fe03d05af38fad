//! Pure calculation functions for fit-and-frame geometry.
//!
//! All functions here are pure and testable without any I/O or images.
//! The backend only ever sees the [`FitPlan`] these produce.

use super::backend::Dimensions;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Exact scale factor applied to both axes, as a fraction in `(0, 1]`.
///
/// Kept as integers so `floor(ratio × original)` is exact: the constraining
/// axis always lands on the target size with no floating-point residue.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScaleRatio {
    pub numerator: u32,
    pub denominator: u32,
}

impl ScaleRatio {
    /// The clamp value: no scaling.
    pub const ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// Floating-point view, for display only.
    pub fn as_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// `floor(self × length)` in integer arithmetic.
    pub fn apply(self, length: u32) -> u32 {
        (length as u64 * self.numerator as u64 / self.denominator as u64) as u32
    }
}

impl PartialEq for ScaleRatio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScaleRatio {}

impl PartialOrd for ScaleRatio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScaleRatio {
    // a/b vs c/d  ⇔  a·d vs c·b
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator as u64 * other.denominator as u64;
        let rhs = other.numerator as u64 * self.denominator as u64;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for ScaleRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({:.4})", self.numerator, self.denominator, self.as_f64())
    }
}

/// Placement of the resized source on the target canvas.
///
/// Consumed once by the backend to drive resize + placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FitPlan {
    pub scale: ScaleRatio,
    pub resized_width: u32,
    pub resized_height: u32,
    /// Left edge of the resized image on the canvas.
    pub offset_x: i64,
    /// Top edge of the resized image on the canvas.
    pub offset_y: i64,
}

impl FitPlan {
    /// True when the resized image covers the whole canvas (no padding).
    pub fn fills(&self, target_width: u32, target_height: u32) -> bool {
        self.resized_width == target_width && self.resized_height == target_height
    }
}

/// Plan a contain fit of `original` into a `target_width × target_height` box.
///
/// The scale is `min(target_w / orig_w, target_h / orig_h, 1)`: the source is
/// never enlarged, a box larger than the source yields padding instead.
/// Resized sizes truncate, offsets use truncating division, so an odd
/// remainder leaves the extra pixel on the right/bottom edge.
///
/// Both `original` dimensions and both target dimensions must be positive;
/// callers reject zero-sized decodes and non-positive request sizes first.
///
/// # Examples
/// ```
/// # use thumbframe::imaging::{Dimensions, plan_fit};
/// // 1000x500 into 200x200 → 200x100, centred vertically
/// let plan = plan_fit(Dimensions { width: 1000, height: 500 }, 200, 200);
/// assert_eq!((plan.resized_width, plan.resized_height), (200, 100));
/// assert_eq!((plan.offset_x, plan.offset_y), (0, 50));
/// ```
pub fn plan_fit(original: Dimensions, target_width: u32, target_height: u32) -> FitPlan {
    debug_assert!(original.width > 0 && original.height > 0);
    debug_assert!(target_width > 0 && target_height > 0);

    let width_ratio = ScaleRatio {
        numerator: target_width,
        denominator: original.width,
    };
    let height_ratio = ScaleRatio {
        numerator: target_height,
        denominator: original.height,
    };
    let scale = width_ratio.min(height_ratio).min(ScaleRatio::ONE);

    let resized_width = scale.apply(original.width);
    let resized_height = scale.apply(original.height);

    FitPlan {
        scale,
        resized_width,
        resized_height,
        offset_x: (target_width as i64 - resized_width as i64) / 2,
        offset_y: (target_height as i64 - resized_height as i64) / 2,
    }
}
