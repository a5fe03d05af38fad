//! Request validation: raw query parameters → [`ThumbnailCommand`].
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! ```text
//! 1. width  present   → MissingWidth
//! 2. height present   → MissingHeight
//! 3. url    present   → MissingUrl
//! 4. width  positive  → InvalidWidth
//! 5. height positive  → InvalidHeight
//! ```
//!
//! "Present" means the key exists with a non-empty value. "Positive" means
//! the value parses as a base-10 integer, is greater than zero and fits in
//! a `u32`. Zero and negative sizes are both rejected.

use thiserror::Error;

/// Query parameters as received, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    pub url: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    /// The original request target, kept for error messages.
    pub target: String,
}

impl RawParams {
    /// Parse a form-encoded query string.
    ///
    /// The first occurrence of a repeated key wins.
    pub fn from_query(target: &str, query: &str) -> Self {
        let mut params = Self {
            target: target.to_string(),
            ..Self::default()
        };
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "url" => &mut params.url,
                "width" => &mut params.width,
                "height" => &mut params.height,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    /// Parse a request target such as `/thumbnail?url=...&width=...`.
    pub fn from_target(target: &str) -> Self {
        let query = target.split_once('?').map(|(_, q)| q).unwrap_or("");
        Self::from_query(target, query)
    }
}

/// A validated thumbnail request. Both sizes are strictly positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailCommand {
    /// `file:///<path>` or a remote URL, verbatim.
    pub source: String,
    pub width: u32,
    pub height: u32,
}

/// Exactly one reason a request was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("malformed request URL, no width parameter specified: {target}")]
    MissingWidth { target: String },
    #[error("malformed request URL, no height parameter specified: {target}")]
    MissingHeight { target: String },
    #[error("malformed request URL, no url parameter specified: {target}")]
    MissingUrl { target: String },
    #[error(
        "malformed request URL, the width parameter specified is illegal, URL: {target}, Width: {raw}"
    )]
    InvalidWidth { raw: String, target: String },
    #[error(
        "malformed request URL, the height parameter specified is illegal, URL: {target}, Height: {raw}"
    )]
    InvalidHeight { raw: String, target: String },
}

impl ValidationError {
    /// Stable tag for logs and tests.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingWidth { .. } => "missing-width",
            Self::MissingHeight { .. } => "missing-height",
            Self::MissingUrl { .. } => "missing-url",
            Self::InvalidWidth { .. } => "invalid-width",
            Self::InvalidHeight { .. } => "invalid-height",
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Base-10 integer, strictly positive, within `u32`.
fn parse_dimension(raw: &str) -> Option<u32> {
    let n: i64 = raw.parse().ok()?;
    u32::try_from(n).ok().filter(|&n| n > 0)
}

/// Validate raw parameters into a command, or the first failing reason.
pub fn validate(raw: &RawParams) -> Result<ThumbnailCommand, ValidationError> {
    let target = || raw.target.clone();

    let width =
        present(&raw.width).ok_or_else(|| ValidationError::MissingWidth { target: target() })?;
    let height =
        present(&raw.height).ok_or_else(|| ValidationError::MissingHeight { target: target() })?;
    let url = present(&raw.url).ok_or_else(|| ValidationError::MissingUrl { target: target() })?;

    let width = parse_dimension(width).ok_or_else(|| ValidationError::InvalidWidth {
        raw: width.to_string(),
        target: target(),
    })?;
    let height = parse_dimension(height).ok_or_else(|| ValidationError::InvalidHeight {
        raw: height.to_string(),
        target: target(),
    })?;

    Ok(ThumbnailCommand {
        source: url.to_string(),
        width,
        height,
    })
}
