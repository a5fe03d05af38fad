//! Service configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a user file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! quality = 100             # JPEG quality (1-100)
//! background = "#000000"    # Letterbox fill colour
//! filter = "catmull-rom"    # nearest | triangle | catmull-rom | gaussian | lanczos3
//! max_pixels = 50000000     # Largest width x height accepted per request
//!
//! [fetch]
//! timeout_secs = 30         # Remote fetch timeout
//! max_bytes = 52428800      # Largest source accepted (50 MiB)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Background, DEFAULT_MAX_PIXELS, Quality, RenderConfig, ResampleFilter};
use crate::source::FetchLimits;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Service configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// How framed thumbnails are rendered and encoded.
    pub output: OutputConfig,
    /// How source images are fetched.
    pub fetch: FetchConfig,
}

impl ServiceConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation("output.quality must be 1-100".into()));
        }
        if self.output.max_pixels == 0 {
            return Err(ConfigError::Validation("output.max_pixels must be non-zero".into()));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Validation("fetch.timeout_secs must be non-zero".into()));
        }
        if self.fetch.max_bytes == 0 {
            return Err(ConfigError::Validation("fetch.max_bytes must be non-zero".into()));
        }
        Ok(())
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            quality: Quality::new(self.output.quality),
            background: self.output.background,
            filter: self.output.filter,
            max_pixels: self.output.max_pixels,
        }
    }

    pub fn fetch_limits(&self) -> FetchLimits {
        FetchLimits {
            timeout: Duration::from_secs(self.fetch.timeout_secs),
            max_bytes: self.fetch.max_bytes,
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Fill for canvas area the resized image does not cover.
    pub background: Background,
    /// Resampling kernel for the downscale.
    pub filter: ResampleFilter,
    /// Largest `width × height` a request may ask for.
    pub max_pixels: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default().value(),
            background: Background::default(),
            filter: ResampleFilter::default(),
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// Source fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let limits = FetchLimits::default();
        Self {
            timeout_secs: limits.timeout.as_secs(),
            max_bytes: limits.max_bytes,
        }
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ServiceConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory, merged over stock defaults.
///
/// A missing file yields the defaults. Invalid TOML, unknown keys and
/// out-of-range values are errors.
pub fn load_config(dir: &Path) -> Result<ServiceConfig, ConfigError> {
    let config_path = dir.join("config.toml");
    let base = stock_defaults_value();
    let merged = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        let overlay: toml::Value = toml::from_str(&content)?;
        merge_toml(base, overlay)
    } else {
        base
    };
    let config: ServiceConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Thumbframe Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# JPEG quality, 1 (smallest) to 100 (best).
quality = 100

# Colour of the letterbox bars around the fitted image, as #rrggbb.
background = "#000000"

# Resampling kernel used when shrinking the source:
# nearest, triangle, catmull-rom, gaussian, lanczos3.
filter = "catmull-rom"

# Largest requested frame, as width x height in pixels. Larger requests are
# rejected with 400 before the source is fetched.
max_pixels = 50000000

# ---------------------------------------------------------------------------
# Fetch
# ---------------------------------------------------------------------------
[fetch]
# Seconds before a remote fetch is abandoned.
timeout_secs = 30

# Largest source image accepted, in bytes.
max_bytes = 52428800
"##
}
