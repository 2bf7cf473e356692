//! # relman-sync
//!
//! Release synchronisation and update-site generation against a repository REST API.
//!
//! - [`release_sync::ReleaseSync`]: tags → releases → per-platform zip assets
//! - [`update_site::UpdateSiteGenerator`]: latest releases → `stable.xml` / `nightly.xml`
//! - [`pipeline`]: one-call entry points wiring both to [`github::GithubClient`]

pub mod api;
pub mod diff;
pub mod error;
pub mod github;
pub mod pipeline;
pub mod release_sync;
pub mod update_site;
pub mod writer;

pub use api::{ArtifactSource, RepositoryApi};
pub use diff::{diff_descriptors, FileDiff};
pub use error::{ApiError, DownloadError, SyncError};
pub use release_sync::{
    AssetOutcome, DeleteOutcome, DeleteReport, ReleaseCoverage, ReleaseOutcome, ReleaseSync,
    SyncReport,
};
pub use update_site::{
    find_asset_for_platform_version, AssetMatch, ChannelEntries, GenerateReport,
    UpdateSiteGenerator,
};
pub use writer::{atomic_write, WriteResult};
