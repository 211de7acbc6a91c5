//! Fetch both download totals and write the badge.

use anyhow::Result;
use std::path::Path;

use crate::badge::{Badge, format_thousands, write_badge};
use crate::config::Config;
use crate::runtime::Runtime;
use crate::source::{DownloadSource, GitHubReleases, HomebrewStore, count_or_zero};

/// Totals of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSummary {
    pub github: u64,
    pub store: u64,
    pub total: u64,
}

/// Runs the pipeline against the services named in `config`.
pub async fn generate<R: Runtime>(runtime: &R, config: &Config) -> Result<DownloadSummary> {
    let github = GitHubReleases::new(
        config.github_client(runtime)?,
        &config.github_api_url,
        config.repo.clone(),
    );
    let store = HomebrewStore::new(config.store_client()?, &config.store_url, &config.package);

    let summary = generate_from(runtime, &github, &store, &config.output).await?;
    println!("Badge URL: {}", config.badge_url());
    Ok(summary)
}

/// Fetches from `github` then `store`, and writes the badge to `output`.
/// Fetch failures count as zero; only the file write can fail.
pub async fn generate_from<R: Runtime>(
    runtime: &R,
    github: &dyn DownloadSource,
    store: &dyn DownloadSource,
    output: &Path,
) -> Result<DownloadSummary> {
    let github_downloads = fetch_and_report(github).await;
    let store_downloads = fetch_and_report(store).await;

    let total = github_downloads.saturating_add(store_downloads);
    println!("Total downloads: {}", format_thousands(total));

    write_badge(runtime, output, &Badge::total_downloads(total))?;
    println!("Badge written: {}", output.display());

    Ok(DownloadSummary {
        github: github_downloads,
        store: store_downloads,
        total,
    })
}

async fn fetch_and_report(source: &dyn DownloadSource) -> u64 {
    println!("Fetching {} downloads...", source.name());
    let count = count_or_zero(source).await;
    println!("{} downloads: {}", source.name(), format_thousands(count));
    count
}
