//! Seams between the orchestrators and the network.
//!
//! [`RepositoryApi`] covers the source-hosting REST calls, [`ArtifactSource`] the
//! unauthenticated artifact host. [`crate::github::GithubClient`] implements both; tests use
//! in-memory fakes.

use relman_core::types::{Asset, NewRelease, Release, Tag};

use crate::error::{ApiError, DownloadError};

/// Repository calls used by release sync and update-site generation.
pub trait RepositoryApi {
    /// Every tag reference of `owner/repo`.
    fn list_tags(&self, owner: &str, repo: &str) -> Result<Vec<Tag>, ApiError>;

    /// Releases of `owner/repo`, up to the endpoint's fixed page size.
    fn list_releases(&self, owner: &str, repo: &str) -> Result<Vec<Release>, ApiError>;

    /// Create a release and return it as stored by the server.
    fn create_release(
        &self,
        owner: &str,
        repo: &str,
        release: &NewRelease,
    ) -> Result<Release, ApiError>;

    /// Delete one asset through its API `url`.
    fn delete_asset(&self, asset: &Asset) -> Result<(), ApiError>;

    /// The latest release of the repository named by `slug` (`owner/repo`).
    fn latest_release(&self, slug: &str) -> Result<Release, ApiError>;

    /// Attach `data` to `release` as a zip asset called `name`.
    fn upload_asset(&self, release: &Release, name: &str, data: Vec<u8>)
        -> Result<Asset, ApiError>;
}

/// The external binary repository artifacts are copied from.
pub trait ArtifactSource {
    /// Fetch `url`. Anything but an HTTP 200 is a [`DownloadError`].
    fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError>;
}
