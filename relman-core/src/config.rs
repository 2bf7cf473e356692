//! YAML configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.relman/
//!   config.yaml      (api_base, token, releases, update_site)
//! ```
//!
//! # API pattern
//!
//! `load_at(path)` reads an explicit file; `load()` derives
//! `<home>/.relman/config.yaml` from `dirs::home_dir()` and delegates.
//! Tests always use `load_at` / `config_path_at`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{PlatformVersion, PluginRepoDescriptor};

/// Default REST API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default number of newest numeric tags processed by a sync.
pub const DEFAULT_TAG_LIMIT: usize = 10;

/// Default directory the update-site descriptors are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "docs";

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_tag_limit() -> usize {
    DEFAULT_TAG_LIMIT
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/// Root of `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub releases: Option<ReleaseSyncConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_site: Option<UpdateSiteConfig>,
}

impl Config {
    /// The `releases` section, or [`ConfigError::MissingSection`].
    pub fn releases(&self) -> Result<&ReleaseSyncConfig, ConfigError> {
        self.releases
            .as_ref()
            .ok_or(ConfigError::MissingSection { section: "releases" })
    }

    /// The `update_site` section, or [`ConfigError::MissingSection`].
    pub fn update_site(&self) -> Result<&UpdateSiteConfig, ConfigError> {
        self.update_site
            .as_ref()
            .ok_or(ConfigError::MissingSection { section: "update_site" })
    }

    /// First non-empty token of `override_token` and the config's own `token`.
    pub fn resolve_token(&self, override_token: Option<&str>) -> Result<String, ConfigError> {
        [override_token, self.token.as_deref()]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
            .map(str::to_owned)
            .ok_or(ConfigError::MissingToken)
    }
}

/// Settings for the release synchronizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSyncConfig {
    pub owner: String,
    pub repo: String,
    /// One artifact per platform version is attached to every release.
    pub platform_versions: Vec<PlatformVersion>,
    /// Asset version template; parameters `version` and `tag`.
    pub asset_version_tpl: String,
    /// Artifact source URL template; parameter `tpl_version`.
    pub artifactory_url_tpl: String,
    #[serde(default = "default_tag_limit")]
    pub tag_limit: usize,
}

impl ReleaseSyncConfig {
    /// `owner/repo`.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Settings for the update-site generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSiteConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Directory of `.tera` files overriding the embedded descriptor template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    /// Plugin descriptors keyed by backing repository slug (`owner/repo`).
    /// Iteration is sorted by slug, so output order is deterministic.
    pub plugin_repos: BTreeMap<String, PluginRepoDescriptor>,
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// `<home>/.relman/config.yaml`: pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".relman").join("config.yaml")
}

/// Load the config at `path`.
///
/// Returns `ConfigError::NotFound` if absent,
/// `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound { path: path.to_path_buf() });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// `load_at` convenience wrapper for `<home>/.relman/config.yaml`.
pub fn load() -> Result<Config, ConfigError> {
    load_at(&config_path_at(&home()?))
}

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
