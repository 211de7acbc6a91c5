//! Download count sources.
//!
//! Each source reports a single download total. [`count_or_zero`] is the
//! boundary where a failed fetch is reported and replaced by zero, so one
//! unreachable service never prevents the badge from being written.

mod github;
mod store;

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use std::fmt;
use std::str::FromStr;

pub use github::{GitHubReleases, Release, ReleaseAsset, sum_release_downloads};
pub use store::{HomebrewStore, Package, PackageIndex, find_package_downloads};

/// Repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            anyhow::bail!("Invalid repository format. Expected 'owner/repo'.")
        } else {
            Ok(RepoId {
                owner: parts[0].to_string(),
                repo: parts[1].to_string(),
            })
        }
    }
}

/// A remote service that reports a download total.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DownloadSource: Send + Sync {
    /// Human-readable name used in progress output.
    fn name(&self) -> &str;

    /// Fetch the current download total from the remote service.
    async fn fetch_downloads(&self) -> Result<u64>;
}

/// Fetch from `source`, printing the failure and returning 0 on any error.
pub async fn count_or_zero(source: &dyn DownloadSource) -> u64 {
    match source.fetch_downloads().await {
        Ok(count) => count,
        Err(e) => {
            println!("Failed to fetch {} downloads: {:#}", source.name(), e);
            debug!("{} fetch error: {:?}", source.name(), e);
            0
        }
    }
}
