//! Template context: serializable rendering payload built from [`ChannelEntry`] lists.

use serde::{Deserialize, Serialize};

use relman_core::types::ChannelEntry;

use crate::error::RenderError;

/// Payload of one channel descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteContext {
    pub plugins: Vec<PluginCtx>,
}

/// One `<idea-plugin>` element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginCtx {
    pub id: String,
    pub name: String,
    /// `<platform version>.0`
    pub since_build: String,
    /// `<platform version>.*`
    pub until_build: String,
    pub version: String,
    pub download_url: String,
}

impl From<&ChannelEntry> for PluginCtx {
    fn from(entry: &ChannelEntry) -> Self {
        PluginCtx {
            id: entry.id.clone(),
            name: entry.name.clone(),
            since_build: format!("{}.0", entry.version),
            until_build: format!("{}.*", entry.version),
            version: entry.plugin_version.clone(),
            download_url: entry.url.clone(),
        }
    }
}

impl SiteContext {
    /// Build a [`SiteContext`], preserving entry order.
    pub fn from_entries(entries: &[ChannelEntry]) -> Self {
        SiteContext {
            plugins: entries.iter().map(PluginCtx::from).collect(),
        }
    }

    /// Convert into a `tera::Context`.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        Ok(tera::Context::from_serialize(self)?)
    }
}
