//! Plugin update-site generator.
//!
//! For each configured plugin repository the latest release is resolved into one
//! [`ChannelEntry`] per platform version and channel:
//!
//! | channel | tag used for URL and version template |
//! |---------|---------------------------------------|
//! | stable  | `<major>.0`                           |
//! | nightly | release tag verbatim                  |
//!
//! Both channel documents aggregate all plugins and are rewritten in full on every run.

use std::path::PathBuf;

use relman_core::config::UpdateSiteConfig;
use relman_core::types::{Channel, ChannelEntry, PlatformVersion, PluginRepoDescriptor, Release};
use relman_core::version::ReleaseVersion;
use relman_renderer::{ParamTemplate, TemplateParams, UpdateSiteRenderer};

use crate::api::RepositoryApi;
use crate::error::SyncError;
use crate::writer::{atomic_write, WriteResult};

/// Result of [`find_asset_for_platform_version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetMatch<'u> {
    /// First download URL containing the platform version.
    Found(&'u str),
    /// No URL matched; the whole collection is handed back. Rendering this produces a
    /// download URL nobody can fetch, so callers log it loudly.
    Fallback(&'u [String]),
}

impl AssetMatch<'_> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, AssetMatch::Fallback(_))
    }

    /// The URL to publish. For a fallback, every URL joined by a single space.
    pub fn to_url(&self) -> String {
        match self {
            AssetMatch::Found(url) => (*url).to_string(),
            AssetMatch::Fallback(urls) => urls.join(" "),
        }
    }
}

/// Scan `urls` for the first one containing `version` as a substring.
pub fn find_asset_for_platform_version<'u>(
    urls: &'u [String],
    version: &PlatformVersion,
) -> AssetMatch<'u> {
    urls.iter()
        .find(|url| url.contains(version.as_str()))
        .map_or(AssetMatch::Fallback(urls), |url| AssetMatch::Found(url.as_str()))
}

/// Entries of one or more plugins, split by channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelEntries {
    pub stable: Vec<ChannelEntry>,
    pub nightly: Vec<ChannelEntry>,
}

impl ChannelEntries {
    pub fn for_channel(&self, channel: Channel) -> &[ChannelEntry] {
        match channel {
            Channel::Stable => &self.stable,
            Channel::Nightly => &self.nightly,
        }
    }

    pub fn append(&mut self, other: ChannelEntries) {
        self.stable.extend(other.stable);
        self.nightly.extend(other.nightly);
    }
}

/// One rendered channel document and where it belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDescriptor {
    pub channel: Channel,
    pub path: PathBuf,
    pub content: String,
}

/// Everything [`UpdateSiteGenerator::preview`] resolved and rendered.
#[derive(Debug, Clone)]
pub struct SitePreview {
    pub entries: ChannelEntries,
    pub documents: Vec<RenderedDescriptor>,
    /// Entries whose download URL came from the no-match fallback.
    pub fallbacks: usize,
}

/// Summary of [`UpdateSiteGenerator::generate`].
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub entries: ChannelEntries,
    pub writes: Vec<WriteResult>,
    /// Entries whose download URL came from the no-match fallback.
    pub fallbacks: usize,
}

/// Builds the stable and nightly `plugin-repository` descriptors.
pub struct UpdateSiteGenerator<'a> {
    config: &'a UpdateSiteConfig,
    api: &'a dyn RepositoryApi,
    renderer: &'a UpdateSiteRenderer,
    dry_run: bool,
}

impl<'a> UpdateSiteGenerator<'a> {
    pub fn new(
        config: &'a UpdateSiteConfig,
        api: &'a dyn RepositoryApi,
        renderer: &'a UpdateSiteRenderer,
    ) -> Self {
        UpdateSiteGenerator {
            config,
            api,
            renderer,
            dry_run: false,
        }
    }

    /// Render but do not write.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Latest release of the repository backing a plugin.
    pub fn fetch_latest(&self, repo_slug: &str) -> Result<Release, SyncError> {
        tracing::info!("fetching latest release of {repo_slug}");
        Ok(self.api.latest_release(repo_slug)?)
    }

    /// Resolve one release of one plugin into stable and nightly entries.
    ///
    /// Fails with a version error when the tag is not `<major>.<minor>`.
    pub fn resolve_entries(
        release: &Release,
        descriptor: &PluginRepoDescriptor,
    ) -> Result<ChannelEntries, SyncError> {
        let raw_tag = release.tag_name.as_str();
        let stable_tag = raw_tag.parse::<ReleaseVersion>()?.stable_tag();
        let version_tpl = ParamTemplate::new(descriptor.version_tpl.as_str())?;
        let urls = release.download_urls();

        let mut entries = ChannelEntries::default();
        for version in &descriptor.versions {
            let found = find_asset_for_platform_version(&urls, version);
            if found.is_fallback() {
                tracing::warn!(
                    "{}: no asset of release {raw_tag} matches platform version {version}; \
                     falling back to the full URL list",
                    descriptor.id
                );
            }
            let url = found.to_url();

            entries.stable.push(ChannelEntry {
                version: version.clone(),
                url: url.replace(raw_tag, &stable_tag),
                plugin_version: plugin_version(&version_tpl, version, &stable_tag)?,
                id: descriptor.id.clone(),
                name: descriptor.name.clone(),
            });
            entries.nightly.push(ChannelEntry {
                version: version.clone(),
                url,
                plugin_version: plugin_version(&version_tpl, version, raw_tag)?,
                id: descriptor.id.clone(),
                name: descriptor.name.clone(),
            });
        }
        Ok(entries)
    }

    /// Render one channel's document.
    pub fn render_xml(&self, entries: &[ChannelEntry]) -> Result<String, SyncError> {
        Ok(self.renderer.render(entries)?)
    }

    /// Fetch and resolve every configured plugin; also counts fallback lookups.
    pub fn collect(&self) -> Result<(ChannelEntries, usize), SyncError> {
        let mut all = ChannelEntries::default();
        let mut fallbacks = 0;
        for (slug, descriptor) in &self.config.plugin_repos {
            let release = self.fetch_latest(slug)?;
            let urls = release.download_urls();
            fallbacks += descriptor
                .versions
                .iter()
                .filter(|v| find_asset_for_platform_version(&urls, v).is_fallback())
                .count();
            all.append(Self::resolve_entries(&release, descriptor)?);
        }
        Ok((all, fallbacks))
    }

    /// Render both channel documents without writing them.
    pub fn preview(&self) -> Result<SitePreview, SyncError> {
        let (entries, fallbacks) = self.collect()?;
        let mut documents = Vec::with_capacity(Channel::all().len());
        for channel in Channel::all() {
            documents.push(RenderedDescriptor {
                channel: *channel,
                path: self.config.output_dir.join(channel.file_name()),
                content: self.render_xml(entries.for_channel(*channel))?,
            });
        }
        Ok(SitePreview {
            entries,
            documents,
            fallbacks,
        })
    }

    /// Render and write `stable.xml` and `nightly.xml` into the output directory.
    ///
    /// Plugins appear in each document sorted by repository slug, not in configuration order.
    pub fn generate(&self) -> Result<GenerateReport, SyncError> {
        let preview = self.preview()?;
        let mut writes = Vec::with_capacity(preview.documents.len());
        for doc in &preview.documents {
            writes.push(atomic_write(&doc.path, &doc.content, self.dry_run)?);
        }
        Ok(GenerateReport {
            entries: preview.entries,
            writes,
            fallbacks: preview.fallbacks,
        })
    }
}

fn plugin_version(
    tpl: &ParamTemplate,
    version: &PlatformVersion,
    tag: &str,
) -> Result<String, SyncError> {
    let params = TemplateParams::new()
        .with("version", version.as_str())
        .with("tag", tag);
    Ok(tpl.substitute(&params)?)
}
