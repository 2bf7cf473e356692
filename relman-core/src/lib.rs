//! relman core library: domain types, version rules, configuration, errors.
//!
//! - [`types`]: tags, releases, assets, plugin descriptors, channel entries
//! - [`version`]: release-number parsing and tag rewriting rules
//! - [`config`]: YAML configuration load / locate
//! - [`error`]: [`ConfigError`], [`VersionError`]

pub mod config;
pub mod error;
pub mod types;
pub mod version;

pub use config::{Config, ReleaseSyncConfig, UpdateSiteConfig};
pub use error::{ConfigError, VersionError};
pub use types::{
    Asset, Channel, ChannelEntry, NewRelease, PlatformVersion, PluginRepoDescriptor, Release,
    Tag, TagName,
};
pub use version::ReleaseVersion;
