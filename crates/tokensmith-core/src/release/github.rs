use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

use tokensmith_types::{AssetLocator, ReleaseMetadata, SyncError};

use super::ReleaseStore;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Only the connect phase is bounded; transfers use the client default.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum characters of an error body carried into [`SyncError::Upstream`].
const ERROR_BODY_LIMIT: usize = 500;

#[derive(Deserialize)]
struct GitHubRelease {
    tag_name: String,
    #[serde(default)]
    assets: Vec<GitHubAsset>,
}

#[derive(Deserialize)]
struct GitHubAsset {
    name: String,
    browser_download_url: String,
}

/// GitHub Releases client.
///
/// `token` is attached as `Authorization: token <value>` on every request.
pub struct GitHubReleaseClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl GitHubReleaseClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, SyncError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SyncError::Network { message: format!("invalid API URL {base_url}: {e}") })?;
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| SyncError::Network { message: e.to_string() })?;
        let token = token.filter(|t| !t.trim().is_empty());
        Ok(Self { client, base_url, token })
    }

    /// Build from `TOKENSMITH_API_URL` and `GITHUB_TOKEN`.
    pub fn from_env() -> Result<Self, SyncError> {
        let base_url =
            std::env::var("TOKENSMITH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&base_url, std::env::var("GITHUB_TOKEN").ok())
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn release_url(&self, repo: &str, version: &str) -> Result<Url, SyncError> {
        let (owner, name) = repo
            .split_once('/')
            .ok_or_else(|| SyncError::Network { message: format!("malformed repo '{repo}'") })?;
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SyncError::Network { message: format!("API URL {} cannot be a base", self.base_url) })?
            .pop_if_empty()
            .extend(["repos", owner, name, "releases", "tags", version]);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(USER_AGENT, concat!("tokensmith/", env!("CARGO_PKG_VERSION")));
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("token {token}")),
            None => request,
        }
    }
}

#[async_trait]
impl ReleaseStore for GitHubReleaseClient {
    async fn fetch_release(&self, repo: &str, version: &str) -> Result<ReleaseMetadata, SyncError> {
        let url = self.release_url(repo, version)?;
        tracing::debug!(%url, authenticated = self.has_token(), "Fetching release metadata");

        let resp = self
            .authorized(self.client.get(url))
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(network_error)?;

        match resp.status() {
            status if status.is_success() => {},
            StatusCode::NOT_FOUND => {
                return Err(SyncError::ReleaseNotFound {
                    repo: repo.to_string(),
                    version: version.to_string(),
                });
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(SyncError::AuthRequired { resource: repo.to_string() });
            },
            status => return Err(upstream_error(status, resp).await),
        }

        let release: GitHubRelease = resp.json().await.map_err(|e| SyncError::Upstream {
            status: StatusCode::OK.as_u16(),
            message: format!("unparseable release metadata: {e}"),
        })?;

        let assets = release
            .assets
            .into_iter()
            .map(|a| (a.name.clone(), AssetLocator { name: a.name, url: a.browser_download_url }))
            .collect();

        Ok(ReleaseMetadata { tag: release.tag_name, assets })
    }

    async fn fetch_asset(&self, asset: &AssetLocator) -> Result<String, SyncError> {
        tracing::debug!(asset = %asset.name, url = %asset.url, "Downloading asset");

        let resp = self
            .authorized(self.client.get(&asset.url))
            .header(ACCEPT, "application/octet-stream")
            .send()
            .await
            .map_err(network_error)?;

        match resp.status() {
            status if status.is_success() => resp.text().await.map_err(network_error),
            StatusCode::NOT_FOUND => Err(SyncError::AssetNotFound { asset: asset.name.clone() }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(SyncError::AuthRequired { resource: asset.name.clone() })
            },
            status => Err(upstream_error(status, resp).await),
        }
    }
}

fn network_error(e: reqwest::Error) -> SyncError {
    SyncError::Network { message: e.to_string() }
}

async fn upstream_error(status: StatusCode, resp: reqwest::Response) -> SyncError {
    let body = resp.text().await.unwrap_or_default();
    let message: String = body.trim().chars().take(ERROR_BODY_LIMIT).collect();
    SyncError::Upstream { status: status.as_u16(), message }
}
