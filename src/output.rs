//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ## Plan
//!
//! ```text
//! Source  1000x500
//! Frame   200x200
//! Scale   200/1000 (0.2000)
//! Resized 200x100
//! Offset  +0+50
//! Padding top 50, bottom 50, left 0, right 0
//! ```
//!
//! ## Render
//!
//! ```text
//! 200 image/jpeg (12345 bytes) → out.jpg
//! ```

use crate::imaging::{Dimensions, FitPlan};
use crate::service::ThumbnailResponse;
use std::path::Path;

/// Describe a fit plan for a source and frame.
pub fn format_plan(source: Dimensions, width: u32, height: u32, plan: &FitPlan) -> Vec<String> {
    let right = width as i64 - plan.resized_width as i64 - plan.offset_x;
    let bottom = height as i64 - plan.resized_height as i64 - plan.offset_y;

    vec![
        format!("Source  {}x{}", source.width, source.height),
        format!("Frame   {}x{}", width, height),
        format!("Scale   {}", plan.scale),
        format!("Resized {}x{}", plan.resized_width, plan.resized_height),
        format!("Offset  {:+}{:+}", plan.offset_x, plan.offset_y),
        format!(
            "Padding top {}, bottom {}, left {}, right {}",
            plan.offset_y, bottom, plan.offset_x, right
        ),
    ]
}

pub fn print_plan(source: Dimensions, width: u32, height: u32, plan: &FitPlan) {
    for line in format_plan(source, width, height, plan) {
        println!("{}", line);
    }
}

/// One status line for a handled request.
///
/// Error bodies are shown inline; image bodies are summarised by size.
pub fn format_response(response: &ThumbnailResponse, written_to: Option<&Path>) -> Vec<String> {
    let mut line = format!("{} {}", response.status, response.content_type);
    if response.is_success() {
        line.push_str(&format!(" ({} bytes)", response.body.len()));
        if let Some(path) = written_to {
            line.push_str(&format!(" → {}", path.display()));
        }
        vec![line]
    } else {
        vec![line, format!("    {}", String::from_utf8_lossy(&response.body))]
    }
}

pub fn print_response(response: &ThumbnailResponse, written_to: Option<&Path>) {
    for line in format_response(response, written_to) {
        eprintln!("{}", line);
    }
}
