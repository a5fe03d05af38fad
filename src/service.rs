//! Request handling: validate → fetch → render → response.
//!
//! [`ThumbnailService::handle`] runs one request end to end and maps every
//! outcome to a [`ThumbnailResponse`]:
//!
//! | Outcome | Status | Body |
//! |---|---|---|
//! | Success | 200 | JPEG bytes (`image/jpeg`) |
//! | Validation, oversized frame, fetch or decode failure | 400 | `{"Error": "<message>"}` |
//! | Encode or compose failure | 500 | plain-text message |
//!
//! The service holds no per-request state, so one instance can serve any
//! number of concurrent requests.

use crate::imaging::{BackendError, ImageBackend, RenderConfig, check_frame, render_thumbnail};
use crate::request::{RawParams, ThumbnailCommand, validate};
use crate::source::{Fetch, SourceRef};
use serde::Serialize;
use tracing::{debug, error, warn};

pub const CONTENT_TYPE_JPEG: &str = "image/jpeg";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Status, content type and body for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

/// JSON body of every 400 response.
#[derive(Debug, Serialize)]
struct JsonError<'a> {
    #[serde(rename = "Error")]
    error: &'a str,
}

impl ThumbnailResponse {
    fn jpeg(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_JPEG,
            body,
        }
    }

    fn bad_request(message: &str) -> Self {
        let body = serde_json::to_vec(&JsonError { error: message })
            .unwrap_or_else(|_| br#"{"Error":"bad request"}"#.to_vec());
        Self {
            status: 400,
            content_type: CONTENT_TYPE_JSON,
            body,
        }
    }

    fn internal_error(message: &str) -> Self {
        Self {
            status: 500,
            content_type: CONTENT_TYPE_TEXT,
            body: message.as_bytes().to_vec(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Stateless request handler over a codec backend and a fetcher.
pub struct ThumbnailService<B, F> {
    backend: B,
    fetcher: F,
    config: RenderConfig,
}

impl<B: ImageBackend, F: Fetch> ThumbnailService<B, F> {
    pub fn new(backend: B, fetcher: F, config: RenderConfig) -> Self {
        Self {
            backend,
            fetcher,
            config,
        }
    }

    /// Handle one request given its raw query parameters.
    pub fn handle(&self, raw: &RawParams) -> ThumbnailResponse {
        let command = match validate(raw) {
            Ok(command) => command,
            Err(e) => {
                warn!(kind = e.kind(), request = %raw.target, "{e}");
                return ThumbnailResponse::bad_request(&e.to_string());
            }
        };
        self.handle_command(&command)
    }

    /// Handle an already-validated command.
    pub fn handle_command(&self, command: &ThumbnailCommand) -> ThumbnailResponse {
        if let Err(e) = check_frame(command, &self.config) {
            warn!(source = %command.source, error = %e, "frame rejected");
            return Self::frame_too_large(command);
        }

        let source = SourceRef::parse(&command.source);
        let data = match self.fetcher.fetch(&source) {
            Ok(data) => data,
            Err(e) => {
                warn!(source = %command.source, error = %e, "fetch failed");
                return ThumbnailResponse::bad_request(&format!(
                    "unable to get image from url: {}",
                    command.source
                ));
            }
        };

        match render_thumbnail(&self.backend, &data, command, &self.config) {
            Ok(rendered) => {
                debug!(
                    source = %command.source,
                    original = ?(rendered.source.width, rendered.source.height),
                    frame = ?(command.width, command.height),
                    scale = %rendered.plan.scale,
                    resized = ?(rendered.plan.resized_width, rendered.plan.resized_height),
                    offset = ?(rendered.plan.offset_x, rendered.plan.offset_y),
                    fills = rendered.plan.fills(command.width, command.height),
                    bytes = rendered.jpeg.len(),
                    "thumbnail rendered"
                );
                ThumbnailResponse::jpeg(rendered.jpeg)
            }
            Err(BackendError::Decode(e)) => {
                warn!(source = %command.source, error = %e, "decode failed");
                ThumbnailResponse::bad_request(&format!(
                    "error decoding image data from url: {}",
                    command.source
                ))
            }
            Err(BackendError::FrameTooLarge { .. }) => Self::frame_too_large(command),
            Err(e) => {
                error!(source = %command.source, error = %e, "render failed");
                ThumbnailResponse::internal_error("error trying to encode the image")
            }
        }
    }

    fn frame_too_large(command: &ThumbnailCommand) -> ThumbnailResponse {
        ThumbnailResponse::bad_request(&format!(
            "requested thumbnail is too large, Width: {}, Height: {}",
            command.width, command.height
        ))
    }
}
