//! Error types for relman-sync.

use std::path::PathBuf;

use thiserror::Error;

use relman_core::error::{ConfigError, VersionError};
use relman_renderer::{RenderError, TemplateError};

/// A failed call to the repository API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },

    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("{method} {url} failed: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// An endpoint path template could not be filled.
    #[error("invalid endpoint template: {0}")]
    Template(#[from] TemplateError),
}

impl ApiError {
    /// True for a non-2xx HTTP answer.
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

/// A failed artifact download. Never fatal to a sync run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("download of {url} failed: {message}")]
    Transport { url: String, message: String },
}

/// All errors that can arise from sync and generate operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// A URL or version template could not be filled.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Missing or invalid configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A tag name that is not `<major>.<minor>`.
    #[error("version error: {0}")]
    Version(#[from] VersionError),

    /// A repository API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
