//! Homebrew App Store package downloads.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};

use crate::http::HttpClient;

use super::DownloadSource;

/// The store's published package catalog.
///
/// Entries are decoded one by one and leniently: a package with a wrongly
/// typed field only loses that field, so it cannot hide the other packages.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PackageIndex {
    #[serde(default, deserialize_with = "lenient_packages")]
    pub packages: Vec<Package>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Package {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub app_dls: Option<u64>,
}

/// `None` for a missing, null or wrongly typed value.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Entries that are not objects become nameless packages that never match.
fn lenient_packages<'de, D>(deserializer: D) -> Result<Vec<Package>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap_or_default())
        .collect())
}

/// `app_dls` of the first package named exactly `name`, or 0.
pub fn find_package_downloads(index: &PackageIndex, name: &str) -> u64 {
    index
        .packages
        .iter()
        .find(|package| package.name.as_deref() == Some(name))
        .and_then(|package| package.app_dls)
        .unwrap_or(0)
}

/// Download counter backed by a store's `repo.json` index.
pub struct HomebrewStore {
    http_client: HttpClient,
    index_url: String,
    package: String,
}

impl HomebrewStore {
    pub fn new(http_client: HttpClient, index_url: &str, package: &str) -> Self {
        Self {
            http_client,
            index_url: index_url.to_string(),
            package: package.to_string(),
        }
    }
}

#[async_trait]
impl DownloadSource for HomebrewStore {
    fn name(&self) -> &str {
        "Homebrew App Store"
    }

    #[tracing::instrument(skip(self), fields(package = %self.package))]
    async fn fetch_downloads(&self) -> Result<u64> {
        debug!("Fetching package index from {}...", self.index_url);
        let index: PackageIndex = self.http_client.get_json(&self.index_url).await?;
        debug!("Package index lists {} package(s)", index.packages.len());
        Ok(find_package_downloads(&index, &self.package))
    }
}
