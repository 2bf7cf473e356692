//! Error types for relman-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from named-parameter templates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A placeholder has no value in the supplied parameters.
    #[error("template '{template}' references unknown parameter '{key}'")]
    MissingKey { key: String, template: String },

    /// `$` not followed by a name, `{name}` or `$`.
    #[error("invalid placeholder at byte {position} in template '{template}'")]
    InvalidPlaceholder { position: usize, template: String },
}

/// All errors that can arise from descriptor rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while loading user templates.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}
