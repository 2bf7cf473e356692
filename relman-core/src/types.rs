//! Domain types for release bookkeeping and the plugin update site.
//!
//! Wire types (`Tag`, `Release`, `Asset`, `NewRelease`) mirror the JSON shapes of the
//! repository API; unknown fields are ignored on deserialize.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// The short name of a tag (`12.5` for `refs/tags/12.5`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TagName(pub String);

impl TagName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TagName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TagName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// An IDE build identifier a plugin artifact targets (e.g. `193`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformVersion(pub String);

impl PlatformVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PlatformVersion {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PlatformVersion {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Repository API wire types
// ---------------------------------------------------------------------------

/// A git reference as returned by the tag-listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "ref")]
    pub reference: String,
}

impl Tag {
    pub fn new(reference: impl Into<String>) -> Self {
        Self { reference: reference.into() }
    }

    /// Final path segment of the reference.
    pub fn name(&self) -> TagName {
        let name = self.reference.rsplit('/').next().unwrap_or(&self.reference);
        TagName::from(name)
    }

    /// The tag name read as a floating-point release number, if it is one.
    pub fn release_number(&self) -> Option<f64> {
        crate::version::release_number(self.name().as_str())
    }
}

/// A binary file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    /// API URL of the asset; target of the delete call.
    pub url: String,
    /// Public URL the IDE downloads from.
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
}

/// A published snapshot associated with a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub id: u64,
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub assets_url: String,
    /// Hypermedia upload URL, e.g. `https://uploads.github.com/.../assets{?name,label}`.
    #[serde(default)]
    pub upload_url: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Release {
    /// True if an asset with exactly this name is attached.
    pub fn has_asset(&self, name: &str) -> bool {
        self.assets.iter().any(|a| a.name == name)
    }

    /// Public download URLs of every attached asset, in API order.
    pub fn download_urls(&self) -> Vec<String> {
        self.assets
            .iter()
            .map(|a| a.browser_download_url.clone())
            .collect()
    }
}

/// Request body for the create-release call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRelease {
    pub tag_name: String,
    pub name: String,
}

impl NewRelease {
    /// A release named after its tag.
    pub fn for_tag(tag: &TagName) -> Self {
        Self {
            tag_name: tag.0.clone(),
            name: tag.0.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Update site
// ---------------------------------------------------------------------------

/// Static per-plugin configuration for the update site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRepoDescriptor {
    /// Plugin id as declared in `plugin.xml`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Platform versions an artifact is published for.
    pub versions: Vec<PlatformVersion>,
    /// Plugin version string template; parameters `version` and `tag`.
    pub version_tpl: String,
}

/// A distribution track of the update site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Stable,
    Nightly,
}

impl Channel {
    /// Both channels in output order.
    pub fn all() -> &'static [Channel] {
        &[Channel::Stable, Channel::Nightly]
    }

    /// Descriptor file name for this channel.
    pub fn file_name(&self) -> &'static str {
        match self {
            Channel::Stable => "stable.xml",
            Channel::Nightly => "nightly.xml",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Stable => write!(f, "stable"),
            Channel::Nightly => write!(f, "nightly"),
        }
    }
}

/// One `<idea-plugin>` element: one plugin, one platform version, one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelEntry {
    pub version: PlatformVersion,
    pub url: String,
    pub plugin_version: String,
    pub id: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
