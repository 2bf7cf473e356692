//! Release synchronizer.
//!
//! One pass: newest numeric tags → a release per tag → one zip asset per platform version
//! per release, copied from the artifact host. Re-running is idempotent since release and
//! asset presence are re-checked by exact name.

use chrono::{DateTime, Utc};

use relman_core::config::ReleaseSyncConfig;
use relman_core::types::{NewRelease, PlatformVersion, Release, Tag, TagName};
use relman_core::version::{release_number, resolve_version_for_url};
use relman_renderer::{ParamTemplate, TemplateParams};

use crate::api::{ArtifactSource, RepositoryApi};
use crate::error::SyncError;

/// Outcome of checking one tag for a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// A release with this `tag_name` already existed.
    Existing { tag: TagName },
    /// A release was created.
    Created { tag: TagName },
    /// `--dry-run`: a release would have been created.
    WouldCreate { tag: TagName },
}

/// Outcome of checking one (release, platform version) pair for its asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    Present {
        tag: TagName,
        asset: String,
    },
    Uploaded {
        tag: TagName,
        asset: String,
        download_url: String,
    },
    WouldUpload {
        tag: TagName,
        asset: String,
        source_url: String,
    },
    /// The artifact host did not answer 200; nothing was uploaded.
    DownloadFailed {
        tag: TagName,
        asset: String,
        source_url: String,
        reason: String,
    },
    /// The release tag is not `<major>.<minor>`, so the artifact cannot be located.
    SkippedMalformedTag {
        tag: TagName,
        asset: String,
        reason: String,
    },
}

/// Summary of [`ReleaseSync::sync_releases`].
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub tags: Vec<TagName>,
    pub releases: Vec<ReleaseOutcome>,
    pub assets: Vec<AssetOutcome>,
}

impl SyncReport {
    pub fn created_count(&self) -> usize {
        self.releases
            .iter()
            .filter(|r| matches!(r, ReleaseOutcome::Created { .. } | ReleaseOutcome::WouldCreate { .. }))
            .count()
    }

    pub fn uploaded_count(&self) -> usize {
        self.assets
            .iter()
            .filter(|a| matches!(a, AssetOutcome::Uploaded { .. } | AssetOutcome::WouldUpload { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.assets
            .iter()
            .filter(|a| {
                matches!(
                    a,
                    AssetOutcome::DownloadFailed { .. } | AssetOutcome::SkippedMalformedTag { .. }
                )
            })
            .count()
    }
}

/// Releases after [`ReleaseSync::ensure_releases`]: pre-existing first, then new ones.
#[derive(Debug, Clone, Default)]
pub struct EnsuredReleases {
    pub releases: Vec<Release>,
    pub outcomes: Vec<ReleaseOutcome>,
}

/// Outcome of one asset deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { tag: TagName, asset: String },
    WouldDelete { tag: TagName, asset: String },
}

/// Summary of [`ReleaseSync::delete_releases`].
#[derive(Debug, Clone, Default)]
pub struct DeleteReport {
    /// Releases inspected; all of them still exist afterwards.
    pub release_count: usize,
    pub assets: Vec<DeleteOutcome>,
}

/// Which platform-version assets one release carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCoverage {
    pub tag: TagName,
    pub published_at: Option<DateTime<Utc>>,
    pub present: Vec<PlatformVersion>,
    pub missing: Vec<PlatformVersion>,
}

/// Keeps a repository's releases and their per-platform assets in step with its tags.
pub struct ReleaseSync<'a> {
    config: &'a ReleaseSyncConfig,
    api: &'a dyn RepositoryApi,
    artifacts: &'a dyn ArtifactSource,
    asset_version_tpl: ParamTemplate,
    artifact_url_tpl: ParamTemplate,
    dry_run: bool,
}

impl<'a> ReleaseSync<'a> {
    /// Parses both templates up front so a bad template fails before any API call.
    pub fn new(
        config: &'a ReleaseSyncConfig,
        api: &'a dyn RepositoryApi,
        artifacts: &'a dyn ArtifactSource,
    ) -> Result<Self, SyncError> {
        Ok(ReleaseSync {
            config,
            api,
            artifacts,
            asset_version_tpl: ParamTemplate::new(config.asset_version_tpl.as_str())?,
            artifact_url_tpl: ParamTemplate::new(config.artifactory_url_tpl.as_str())?,
            dry_run: false,
        })
    }

    /// Report creations and uploads without performing them (or downloading anything).
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Fetch tags, ensure releases, then ensure assets.
    pub fn sync_releases(&self) -> Result<SyncReport, SyncError> {
        let tags = self.fetch_tags(self.config.tag_limit)?;
        tracing::info!(
            "{}: {} numeric tag(s) to process",
            self.config.slug(),
            tags.len()
        );
        let ensured = self.ensure_releases(&tags)?;
        let assets = self.sync_assets(&ensured.releases)?;
        Ok(SyncReport {
            tags: tags.iter().map(Tag::name).collect(),
            releases: ensured.outcomes,
            assets,
        })
    }

    /// Numeric tags, newest first, at most `limit`.
    ///
    /// A non-2xx answer from the tag listing yields an empty list.
    pub fn fetch_tags(&self, limit: usize) -> Result<Vec<Tag>, SyncError> {
        let tags = match self.api.list_tags(&self.config.owner, &self.config.repo) {
            Ok(tags) => tags,
            Err(e) if e.is_status() => {
                tracing::warn!("tag listing failed, treating as empty: {e}");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        let mut numbered: Vec<(f64, Tag)> = tags
            .into_iter()
            .filter_map(|tag| tag.release_number().map(|n| (n, tag)))
            .collect();
        numbered.sort_by(|a, b| b.0.total_cmp(&a.0));
        numbered.truncate(limit);
        Ok(numbered.into_iter().map(|(_, tag)| tag).collect())
    }

    /// Create a release for every tag that has none.
    pub fn ensure_releases(&self, tags: &[Tag]) -> Result<EnsuredReleases, SyncError> {
        let mut releases = self
            .api
            .list_releases(&self.config.owner, &self.config.repo)?;
        let mut outcomes = Vec::with_capacity(tags.len());

        for tag in tags {
            let name = tag.name();
            if releases.iter().any(|r| r.tag_name == name.0) {
                outcomes.push(ReleaseOutcome::Existing { tag: name });
                continue;
            }

            if self.dry_run {
                tracing::info!("[dry-run] would create release for tag {}", tag.reference);
                releases.push(Release {
                    tag_name: name.0.clone(),
                    name: Some(name.0.clone()),
                    ..Default::default()
                });
                outcomes.push(ReleaseOutcome::WouldCreate { tag: name });
                continue;
            }

            tracing::info!("creating release for tag {}", tag.reference);
            let created = self.api.create_release(
                &self.config.owner,
                &self.config.repo,
                &NewRelease::for_tag(&name),
            )?;
            releases.push(created);
            outcomes.push(ReleaseOutcome::Created { tag: name });
        }

        Ok(EnsuredReleases { releases, outcomes })
    }

    /// Attach every missing `<asset version>.zip` to every release.
    ///
    /// Download failures are reported and skipped; upload failures abort.
    pub fn sync_assets(&self, releases: &[Release]) -> Result<Vec<AssetOutcome>, SyncError> {
        let mut outcomes = Vec::new();
        for release in releases {
            for version in &self.config.platform_versions {
                outcomes.push(self.sync_asset(release, version)?);
            }
        }
        Ok(outcomes)
    }

    fn sync_asset(
        &self,
        release: &Release,
        version: &PlatformVersion,
    ) -> Result<AssetOutcome, SyncError> {
        let tag = TagName::from(release.tag_name.as_str());
        let asset = format!("{}.zip", self.asset_version_for(version, &release.tag_name)?);
        if release.has_asset(&asset) {
            return Ok(AssetOutcome::Present { tag, asset });
        }

        let url_tag = match resolve_version_for_url(&release.tag_name) {
            Ok(url_tag) => url_tag,
            Err(e) => {
                tracing::warn!("skipping {asset} for release {tag}: {e}");
                return Ok(AssetOutcome::SkippedMalformedTag {
                    tag,
                    asset,
                    reason: e.to_string(),
                });
            }
        };
        let source_url = self.artifact_url(&self.asset_version_for(version, &url_tag)?)?;

        if self.dry_run {
            tracing::info!("[dry-run] would upload {asset} to release {tag} from {source_url}");
            return Ok(AssetOutcome::WouldUpload {
                tag,
                asset,
                source_url,
            });
        }

        let bytes = match self.artifacts.download(&source_url) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("unsuccessful download of artifact at {source_url}: {e}");
                return Ok(AssetOutcome::DownloadFailed {
                    tag,
                    asset,
                    source_url,
                    reason: e.to_string(),
                });
            }
        };

        let uploaded = self.api.upload_asset(release, &asset, bytes)?;
        tracing::info!("uploaded {}", uploaded.browser_download_url);
        Ok(AssetOutcome::Uploaded {
            tag,
            asset,
            download_url: uploaded.browser_download_url,
        })
    }

    /// Delete every asset of every release. The releases themselves are kept.
    pub fn delete_releases(&self) -> Result<DeleteReport, SyncError> {
        let releases = self
            .api
            .list_releases(&self.config.owner, &self.config.repo)?;
        let mut assets = Vec::new();
        for release in &releases {
            let tag = TagName::from(release.tag_name.as_str());
            for asset in &release.assets {
                if self.dry_run {
                    tracing::info!("[dry-run] would delete {} from {tag}", asset.name);
                    assets.push(DeleteOutcome::WouldDelete {
                        tag: tag.clone(),
                        asset: asset.name.clone(),
                    });
                    continue;
                }
                self.api.delete_asset(asset)?;
                tracing::info!("deleted {} from {tag}", asset.name);
                assets.push(DeleteOutcome::Deleted {
                    tag: tag.clone(),
                    asset: asset.name.clone(),
                });
            }
        }
        Ok(DeleteReport {
            release_count: releases.len(),
            assets,
        })
    }

    /// Per-release asset coverage, numeric tags newest first, others after by name.
    pub fn status(&self) -> Result<Vec<ReleaseCoverage>, SyncError> {
        let mut releases = self
            .api
            .list_releases(&self.config.owner, &self.config.repo)?;
        releases.sort_by(|a, b| {
            match (release_number(&a.tag_name), release_number(&b.tag_name)) {
                (Some(x), Some(y)) => y.total_cmp(&x),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.tag_name.cmp(&b.tag_name),
            }
        });

        let mut coverage = Vec::with_capacity(releases.len());
        for release in &releases {
            let mut present = Vec::new();
            let mut missing = Vec::new();
            for version in &self.config.platform_versions {
                let asset = format!("{}.zip", self.asset_version_for(version, &release.tag_name)?);
                if release.has_asset(&asset) {
                    present.push(version.clone());
                } else {
                    missing.push(version.clone());
                }
            }
            coverage.push(ReleaseCoverage {
                tag: TagName::from(release.tag_name.as_str()),
                published_at: release.published_at,
                present,
                missing,
            });
        }
        Ok(coverage)
    }

    /// `asset_version_tpl` filled with `version` and `tag`.
    pub fn asset_version_for(
        &self,
        version: &PlatformVersion,
        tag: &str,
    ) -> Result<String, SyncError> {
        let params = TemplateParams::new()
            .with("version", version.as_str())
            .with("tag", tag);
        Ok(self.asset_version_tpl.substitute(&params)?)
    }

    /// `artifactory_url_tpl` filled with `tpl_version`.
    pub fn artifact_url(&self, tpl_version: &str) -> Result<String, SyncError> {
        let params = TemplateParams::new().with("tpl_version", tpl_version);
        Ok(self.artifact_url_tpl.substitute(&params)?)
    }
}
