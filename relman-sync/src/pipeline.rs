//! Shared entry points used by the CLI.
//!
//! Each function builds a [`GithubClient`] from the configuration and runs exactly one
//! orchestrator pass.

use relman_core::config::Config;
use relman_renderer::UpdateSiteRenderer;

use crate::diff::{diff_descriptors, FileDiff};
use crate::github::GithubClient;
use crate::release_sync::{DeleteReport, ReleaseCoverage, ReleaseSync, SyncReport};
use crate::update_site::{GenerateReport, UpdateSiteGenerator};
use crate::SyncError;

fn client(config: &Config, token: &str) -> GithubClient {
    GithubClient::new(config.api_base.as_str(), token)
}

fn renderer(config: &Config) -> Result<UpdateSiteRenderer, SyncError> {
    let site = config.update_site()?;
    Ok(match site.template_dir.as_deref() {
        Some(dir) => UpdateSiteRenderer::with_template_dir(dir)?,
        None => UpdateSiteRenderer::new()?,
    })
}

/// Create missing releases and upload missing assets.
pub fn sync_releases(config: &Config, token: &str, dry_run: bool) -> Result<SyncReport, SyncError> {
    let releases = config.releases()?;
    let client = client(config, token);
    ReleaseSync::new(releases, &client, &client)?
        .dry_run(dry_run)
        .sync_releases()
}

/// Delete every asset of every release.
pub fn delete_release_assets(
    config: &Config,
    token: &str,
    dry_run: bool,
) -> Result<DeleteReport, SyncError> {
    let releases = config.releases()?;
    let client = client(config, token);
    ReleaseSync::new(releases, &client, &client)?
        .dry_run(dry_run)
        .delete_releases()
}

/// Per-release platform-version coverage.
pub fn release_status(config: &Config, token: &str) -> Result<Vec<ReleaseCoverage>, SyncError> {
    let releases = config.releases()?;
    let client = client(config, token);
    ReleaseSync::new(releases, &client, &client)?.status()
}

/// Render and write the stable and nightly descriptors.
pub fn generate(config: &Config, token: &str, dry_run: bool) -> Result<GenerateReport, SyncError> {
    let site = config.update_site()?;
    let renderer = renderer(config)?;
    let client = client(config, token);
    UpdateSiteGenerator::new(site, &client, &renderer)
        .dry_run(dry_run)
        .generate()
}

/// Diff what [`generate`] would write against the files on disk.
pub fn diff(config: &Config, token: &str) -> Result<Vec<FileDiff>, SyncError> {
    let site = config.update_site()?;
    let renderer = renderer(config)?;
    let client = client(config, token);
    let preview = UpdateSiteGenerator::new(site, &client, &renderer).preview()?;
    diff_descriptors(&preview.documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relman_core::config::DEFAULT_API_BASE;
    use relman_core::ConfigError;

    fn empty_config() -> Config {
        Config {
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
            releases: None,
            update_site: None,
        }
    }

    #[test]
    fn sync_without_releases_section_fails_before_network() {
        let err = sync_releases(&empty_config(), "t", true).unwrap_err();
        assert!(matches!(
            err,
            SyncError::Config(ConfigError::MissingSection { section: "releases" })
        ));
    }

    #[test]
    fn generate_without_update_site_section_fails_before_network() {
        let err = generate(&empty_config(), "t", true).unwrap_err();
        assert!(matches!(
            err,
            SyncError::Config(ConfigError::MissingSection { section: "update_site" })
        ));
    }
}
