//! Error types for relman-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while locating or loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error on load: includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`: cannot locate `~/.relman/`.
    #[error("cannot determine home directory; set $HOME or pass --config")]
    HomeNotFound,

    /// The config file did not exist at the expected path.
    #[error("config not found at {path}")]
    NotFound { path: PathBuf },

    /// A command needs a config section that the file does not define.
    #[error("config has no `{section}` section")]
    MissingSection { section: &'static str },

    /// No token from the command line, the environment or the config file.
    #[error("no API token; pass --token, set GITHUB_TOKEN or add `token` to the config")]
    MissingToken,
}

/// A tag name that cannot be read as `<major>.<minor>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("tag '{tag}' is not of the form <major>.<minor>")]
    Malformed { tag: String },
}
