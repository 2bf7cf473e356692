//! In-memory stand-ins for the repository API and the artifact host.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use relman_core::types::{Asset, NewRelease, Release, Tag};
use relman_sync::{ApiError, ArtifactSource, DownloadError, RepositoryApi};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn asset(tag: &str, name: &str) -> Asset {
    Asset {
        id: 0,
        name: name.to_string(),
        url: format!("https://api.example.com/assets/{tag}/{name}"),
        browser_download_url: format!("https://example.com/download/{tag}/{name}"),
        size: 0,
    }
}

pub fn release(tag: &str, asset_names: &[&str]) -> Release {
    Release {
        tag_name: tag.to_string(),
        name: Some(tag.to_string()),
        assets: asset_names.iter().map(|n| asset(tag, n)).collect(),
        ..Default::default()
    }
}

/// A repository whose state lives in memory and records every mutating call.
#[derive(Default)]
pub struct FakeRepo {
    pub tags: RefCell<Vec<Tag>>,
    pub releases: RefCell<Vec<Release>>,
    pub latest: RefCell<HashMap<String, Release>>,
    pub tag_listing_status: Cell<Option<u16>>,
    pub created: RefCell<Vec<NewRelease>>,
    pub uploaded: RefCell<Vec<(String, String, usize)>>,
    pub deleted: RefCell<Vec<String>>,
    next_id: Cell<u64>,
}

impl FakeRepo {
    pub fn with_tags(names: &[&str]) -> Self {
        let repo = FakeRepo::default();
        *repo.tags.borrow_mut() = names
            .iter()
            .map(|n| Tag::new(format!("refs/tags/{n}")))
            .collect();
        repo
    }

    pub fn add_release(&self, release: Release) {
        self.releases.borrow_mut().push(release);
    }

    pub fn set_latest(&self, slug: &str, release: Release) {
        self.latest.borrow_mut().insert(slug.to_string(), release);
    }

    pub fn fail_tag_listing(&self, status: u16) {
        self.tag_listing_status.set(Some(status));
    }

    pub fn mutation_count(&self) -> usize {
        self.created.borrow().len() + self.uploaded.borrow().len() + self.deleted.borrow().len()
    }

    fn id(&self) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl RepositoryApi for FakeRepo {
    fn list_tags(&self, owner: &str, repo: &str) -> Result<Vec<Tag>, ApiError> {
        if let Some(status) = self.tag_listing_status.get() {
            return Err(ApiError::Status {
                method: "GET",
                url: format!("https://api.example.com/repos/{owner}/{repo}/git/refs/tags"),
                status,
            });
        }
        Ok(self.tags.borrow().clone())
    }

    fn list_releases(&self, _owner: &str, _repo: &str) -> Result<Vec<Release>, ApiError> {
        Ok(self.releases.borrow().clone())
    }

    fn create_release(
        &self,
        _owner: &str,
        _repo: &str,
        release: &NewRelease,
    ) -> Result<Release, ApiError> {
        self.created.borrow_mut().push(release.clone());
        let id = self.id();
        let stored = Release {
            id,
            tag_name: release.tag_name.clone(),
            name: Some(release.name.clone()),
            upload_url: format!("https://uploads.example.com/releases/{id}/assets{{?name,label}}"),
            ..Default::default()
        };
        self.releases.borrow_mut().push(stored.clone());
        Ok(stored)
    }

    fn delete_asset(&self, target: &Asset) -> Result<(), ApiError> {
        self.deleted.borrow_mut().push(target.name.clone());
        for release in self.releases.borrow_mut().iter_mut() {
            release.assets.retain(|a| a.url != target.url);
        }
        Ok(())
    }

    fn latest_release(&self, slug: &str) -> Result<Release, ApiError> {
        self.latest
            .borrow()
            .get(slug)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                method: "GET",
                url: format!("https://api.example.com/repos/{slug}/releases/latest"),
                status: 404,
            })
    }

    fn upload_asset(&self, target: &Release, name: &str, data: Vec<u8>) -> Result<Asset, ApiError> {
        self.uploaded
            .borrow_mut()
            .push((target.tag_name.clone(), name.to_string(), data.len()));
        let uploaded = asset(&target.tag_name, name);
        for release in self.releases.borrow_mut().iter_mut() {
            if release.tag_name == target.tag_name {
                release.assets.push(uploaded.clone());
            }
        }
        Ok(uploaded)
    }
}

/// Artifact host serving fixed bodies; unknown URLs answer 404.
#[derive(Default)]
pub struct FakeArtifacts {
    pub bodies: HashMap<String, Vec<u8>>,
    pub statuses: HashMap<String, u16>,
    pub requested: RefCell<Vec<String>>,
}

impl FakeArtifacts {
    pub fn serve(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_string(), body.to_vec());
        self
    }

    pub fn answer(mut self, url: &str, status: u16) -> Self {
        self.statuses.insert(url.to_string(), status);
        self
    }
}

impl ArtifactSource for FakeArtifacts {
    fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        self.requested.borrow_mut().push(url.to_string());
        if let Some(status) = self.statuses.get(url) {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: *status,
            });
        }
        self.bodies.get(url).cloned().ok_or_else(|| DownloadError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
