use anyhow::Result;
use clap::Parser;
use clap::builder::TypedValueParser;
use downloads_badge::config::{
    Config, DEFAULT_GITHUB_API_URL, DEFAULT_OUTPUT, DEFAULT_PACKAGE, DEFAULT_PUBLIC_URL,
    DEFAULT_REPO, DEFAULT_STORE_URL,
};
use downloads_badge::http::DEFAULT_ATTEMPTS;
use downloads_badge::source::RepoId;
use std::path::PathBuf;
use std::time::Duration;

/// downloads-badge - total download count badge
///
/// Sums GitHub release asset downloads and Homebrew App Store downloads, then
/// writes a shields.io endpoint badge. A source that cannot be reached counts
/// as zero downloads.
///
/// If the GITHUB_TOKEN environment variable is set, it is sent to the GitHub
/// API to avoid rate limits.
#[derive(Parser, Debug)]
#[command(author, version = env!("DOWNLOADS_BADGE_VERSION"), about)]
struct Cli {
    /// GitHub repository whose release assets are counted
    #[arg(long, value_name = "OWNER/REPO", default_value = DEFAULT_REPO)]
    repo: RepoId,

    /// Package name to look up in the store index
    #[arg(long, value_name = "NAME", default_value = DEFAULT_PACKAGE)]
    package: String,

    /// GitHub API URL
    #[arg(long = "github-api-url", value_name = "URL", default_value = DEFAULT_GITHUB_API_URL)]
    github_api_url: String,

    /// Store package index URL
    #[arg(long = "store-url", value_name = "URL", default_value = DEFAULT_STORE_URL)]
    store_url: String,

    /// Badge file to write (overwritten on every run)
    #[arg(long, short = 'o', value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Base URL the badge file is served from, used in the printed badge URL
    #[arg(long = "public-url", value_name = "URL", default_value = DEFAULT_PUBLIC_URL)]
    public_url: String,

    /// Attempts per request; transient failures are retried up to this many times
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_ATTEMPTS,
        value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize)
    )]
    attempts: usize,

    /// Request timeout in seconds (transport default when omitted)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            repo: cli.repo,
            package: cli.package,
            github_api_url: cli.github_api_url,
            store_url: cli.store_url,
            output: cli.output,
            public_url: cli.public_url,
            attempts: cli.attempts,
            timeout: cli.timeout.map(Duration::from_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let config = Config::from(Cli::parse());
    let runtime = downloads_badge::runtime::RealRuntime;

    downloads_badge::generate(&runtime, &config).await?;
    Ok(())
}
