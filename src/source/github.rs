//! GitHub release asset downloads.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use crate::http::{HttpClient, RequestError};

use super::{DownloadSource, RepoId};

/// A release as returned by the releases listing endpoint.
/// Only the fields needed for counting are kept.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Release {
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ReleaseAsset {
    #[serde(default)]
    pub download_count: u64,
}

/// Sum of every asset's download count across every release.
pub fn sum_release_downloads(releases: &[Release]) -> u64 {
    releases
        .iter()
        .flat_map(|release| &release.assets)
        .fold(0u64, |total, asset| total.saturating_add(asset.download_count))
}

/// Download counter backed by the GitHub releases API.
pub struct GitHubReleases {
    http_client: HttpClient,
    api_url: String,
    repo: RepoId,
}

impl GitHubReleases {
    pub fn new(http_client: HttpClient, api_url: &str, repo: RepoId) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            repo,
        }
    }

    pub fn releases_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.api_url, self.repo.owner, self.repo.repo
        )
    }

    /// Fetches the first page of releases only.
    async fn fetch_releases(&self) -> Result<Vec<Release>> {
        let url = self.releases_url();
        debug!("Fetching releases from {}...", url);
        self.http_client.get_json(&url).await
    }
}

#[async_trait]
impl DownloadSource for GitHubReleases {
    fn name(&self) -> &str {
        "GitHub"
    }

    #[tracing::instrument(skip(self), fields(repo = %self.repo))]
    async fn fetch_downloads(&self) -> Result<u64> {
        let releases = self.fetch_releases().await.map_err(with_token_hint)?;
        let total = sum_release_downloads(&releases);
        debug!("{} release(s) of {}, {} downloads", releases.len(), self.repo, total);
        Ok(total)
    }
}

/// Rate limit and auth failures from the GitHub API depend on `GITHUB_TOKEN`.
fn with_token_hint(error: anyhow::Error) -> anyhow::Error {
    let auth_related = error
        .downcast_ref::<RequestError>()
        .is_some_and(RequestError::is_auth_related);
    if auth_related {
        error.context("GitHub API refused the request; set or check GITHUB_TOKEN")
    } else {
        error
    }
}
