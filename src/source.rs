//! Source references and fetching.
//!
//! A source is either a local file (`file:///<path>`, path taken verbatim
//! after the 8-character prefix, so `file:///a.png` reads `a.png` relative
//! to the working directory) or anything else, which is fetched over HTTP.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const FILE_PREFIX: &str = "file:///";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("unable to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to get image from url {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unable to read body from url {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to get image from url {url}: HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("image at {reference} exceeds {limit} bytes")]
    TooLarge { reference: String, limit: u64 },
}

/// Where a source image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    File(PathBuf),
    Remote(String),
}

impl SourceRef {
    pub fn parse(reference: &str) -> Self {
        match reference.strip_prefix(FILE_PREFIX) {
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::Remote(reference.to_string()),
        }
    }
}

/// Something that can turn a [`SourceRef`] into encoded image bytes.
pub trait Fetch: Sync {
    fn fetch(&self, source: &SourceRef) -> Result<Vec<u8>, FetchError>;
}

/// Fetch settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
    pub timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Blocking HTTP + filesystem fetcher.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    limits: FetchLimits,
}

impl HttpFetcher {
    pub fn new(limits: FetchLimits) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(limits.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, limits })
    }

    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let http_err = |source| FetchError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        if response
            .content_length()
            .is_some_and(|len| len > self.limits.max_bytes)
        {
            return Err(self.too_large(url));
        }

        // Content-Length can be absent or wrong; cap the read as well.
        let mut body = Vec::new();
        response
            .take(self.limits.max_bytes + 1)
            .read_to_end(&mut body)
            .map_err(|source| FetchError::Body {
                url: url.to_string(),
                source,
            })?;
        if body.len() as u64 > self.limits.max_bytes {
            return Err(self.too_large(url));
        }
        Ok(body)
    }

    fn fetch_file(&self, path: &Path) -> Result<Vec<u8>, FetchError> {
        let io_err = |source| FetchError::Io {
            path: path.to_path_buf(),
            source,
        };
        let len = std::fs::metadata(path).map_err(io_err)?.len();
        if len > self.limits.max_bytes {
            return Err(self.too_large(&path.display().to_string()));
        }
        std::fs::read(path).map_err(io_err)
    }

    fn too_large(&self, reference: &str) -> FetchError {
        FetchError::TooLarge {
            reference: reference.to_string(),
            limit: self.limits.max_bytes,
        }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, source: &SourceRef) -> Result<Vec<u8>, FetchError> {
        match source {
            SourceRef::File(path) => self.fetch_file(path),
            SourceRef::Remote(url) => self.fetch_remote(url),
        }
    }
}
