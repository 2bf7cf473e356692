//! Blocking GitHub REST client over `ureq`.
//!
//! Every repository call carries `Authorization: token <T>`; artifact downloads are
//! unauthenticated. Endpoint paths are `$name` templates filled through
//! [`relman_renderer::ParamTemplate`].

use std::io::Read;

use relman_core::types::{Asset, NewRelease, Release, Tag};
use relman_renderer::{render_str, TemplateParams};

use crate::api::{ArtifactSource, RepositoryApi};
use crate::error::{ApiError, DownloadError};

const USER_AGENT: &str = concat!("relman/", env!("CARGO_PKG_VERSION"));

const TAGS_PATH: &str = "/repos/$owner/$repo/git/refs/tags";
const RELEASES_PATH: &str = "/repos/$owner/$repo/releases";
const LATEST_RELEASE_PATH: &str = "/repos/$slug/releases/latest";

/// Fixed page size of the release listing; there is no pagination.
const RELEASES_PER_PAGE: &str = "100";

/// A repository API client bound to one API root and token.
pub struct GithubClient {
    agent: ureq::Agent,
    api_base: String,
    token: String,
}

impl GithubClient {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        GithubClient {
            agent: ureq::AgentBuilder::new().build(),
            api_base,
            token: token.into(),
        }
    }

    fn api_url(&self, path: &str, params: &TemplateParams) -> Result<String, ApiError> {
        Ok(format!("{}{}", self.api_base, render_str(path, params)?))
    }

    fn request(&self, method: &str, url: &str, content_type: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("User-Agent", USER_AGENT)
            .set("Content-Type", content_type)
            .set("Authorization", &format!("token {}", self.token))
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        tracing::debug!("GET {url}");
        let mut request = self.request("GET", url, "application/json");
        for (key, value) in query {
            request = request.query(key, value);
        }
        let response = request.call().map_err(|e| call_err("GET", url, e))?;
        decode(url, response)
    }
}

fn repo_params(owner: &str, repo: &str) -> TemplateParams {
    TemplateParams::new().with("owner", owner).with("repo", repo)
}

fn call_err(method: &'static str, url: &str, err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, _) => ApiError::Status {
            method,
            url: url.to_string(),
            status,
        },
        ureq::Error::Transport(transport) => ApiError::Transport {
            method,
            url: url.to_string(),
            message: transport.to_string(),
        },
    }
}

fn decode<T: serde::de::DeserializeOwned>(url: &str, response: ureq::Response) -> Result<T, ApiError> {
    response.into_json().map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Where asset bytes are POSTed for `release`.
///
/// Uses `upload_url` without its `{?name,label}` hypermedia suffix; when the server did not
/// return one, derives it from `assets_url` by moving to the `uploads.` host.
pub fn upload_endpoint(release: &Release) -> String {
    if !release.upload_url.is_empty() {
        let base = release
            .upload_url
            .split_once('{')
            .map_or(release.upload_url.as_str(), |(base, _)| base);
        return base.to_string();
    }
    release.assets_url.replacen("://api.", "://uploads.", 1)
}

impl RepositoryApi for GithubClient {
    fn list_tags(&self, owner: &str, repo: &str) -> Result<Vec<Tag>, ApiError> {
        let url = self.api_url(TAGS_PATH, &repo_params(owner, repo))?;
        self.get_json(&url, &[])
    }

    fn list_releases(&self, owner: &str, repo: &str) -> Result<Vec<Release>, ApiError> {
        let url = self.api_url(RELEASES_PATH, &repo_params(owner, repo))?;
        self.get_json(&url, &[("per_page", RELEASES_PER_PAGE)])
    }

    fn create_release(
        &self,
        owner: &str,
        repo: &str,
        release: &NewRelease,
    ) -> Result<Release, ApiError> {
        let url = self.api_url(RELEASES_PATH, &repo_params(owner, repo))?;
        tracing::debug!("POST {url}");
        let response = self
            .request("POST", &url, "application/json")
            .send_json(release)
            .map_err(|e| call_err("POST", &url, e))?;
        decode(&url, response)
    }

    fn delete_asset(&self, asset: &Asset) -> Result<(), ApiError> {
        tracing::debug!("DELETE {}", asset.url);
        self.request("DELETE", &asset.url, "application/json")
            .call()
            .map_err(|e| call_err("DELETE", &asset.url, e))?;
        Ok(())
    }

    fn latest_release(&self, slug: &str) -> Result<Release, ApiError> {
        let url = self.api_url(LATEST_RELEASE_PATH, &TemplateParams::new().with("slug", slug))?;
        self.get_json(&url, &[])
    }

    fn upload_asset(
        &self,
        release: &Release,
        name: &str,
        data: Vec<u8>,
    ) -> Result<Asset, ApiError> {
        let url = upload_endpoint(release);
        tracing::debug!("POST {url}?name={name} ({} bytes)", data.len());
        let response = self
            .request("POST", &url, "application/zip")
            .query("name", name)
            .send_bytes(&data)
            .map_err(|e| call_err("POST", &url, e))?;
        decode(&url, response)
    }
}

impl ArtifactSource for GithubClient {
    fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        tracing::debug!("GET {url} (artifact)");
        let response = self
            .agent
            .get(url)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(status, _) => DownloadError::Status {
                    url: url.to_string(),
                    status,
                },
                ureq::Error::Transport(transport) => DownloadError::Transport {
                    url: url.to_string(),
                    message: transport.to_string(),
                },
            })?;
        if response.status() != 200 {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }
        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| DownloadError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(bytes)
    }
}
