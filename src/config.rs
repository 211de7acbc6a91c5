//! Resolved settings for one badge run and the HTTP clients built from them.

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::{
    Client, ClientBuilder,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use std::path::PathBuf;
use std::time::Duration;

use crate::http::{DEFAULT_ATTEMPTS, HttpClient};
use crate::runtime::Runtime;
use crate::source::RepoId;

pub const DEFAULT_REPO: &str = "giovannimirulla/TsVitch";
pub const DEFAULT_PACKAGE: &str = "TsVitch";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_STORE_URL: &str = "https://switch.cdn.fortheusers.org/repo.json";
pub const DEFAULT_OUTPUT: &str = "downloads-badge.json";
pub const DEFAULT_PUBLIC_URL: &str = "https://your-domain.com";

const USER_AGENT: &str = "downloads-badge";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub repo: RepoId,
    pub package: String,
    pub github_api_url: String,
    pub store_url: String,
    pub output: PathBuf,
    /// Where the badge file is published; only used in the printed badge URL.
    pub public_url: String,
    pub attempts: usize,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: RepoId {
                owner: "giovannimirulla".to_string(),
                repo: "TsVitch".to_string(),
            },
            package: DEFAULT_PACKAGE.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            store_url: DEFAULT_STORE_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            attempts: DEFAULT_ATTEMPTS,
            timeout: None,
        }
    }
}

impl Config {
    /// shields.io endpoint URL for the published badge file.
    pub fn badge_url(&self) -> String {
        let file_name = self
            .output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
        format!(
            "https://img.shields.io/endpoint?url={}/{}",
            self.public_url.trim_end_matches('/'),
            file_name
        )
    }

    /// Client for the GitHub API. Sends `GITHUB_TOKEN` as a bearer token when set.
    /// A token that cannot be sent as a header is ignored with a warning.
    pub fn github_client<R: Runtime>(&self, runtime: &R) -> Result<HttpClient> {
        let mut headers = HeaderMap::new();
        if let Ok(token) = runtime.env_var("GITHUB_TOKEN")
            && !token.is_empty()
        {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut auth_value) => {
                    auth_value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, auth_value);
                    debug!("Using GITHUB_TOKEN for authentication ({} chars)", token.len());
                }
                Err(e) => warn!(
                    "Ignoring GITHUB_TOKEN, it is not a valid header value: {}",
                    e
                ),
            }
        }

        let client = self
            .client_builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpClient::with_attempts(client, self.attempts))
    }

    /// Client for the store index. Never carries credentials.
    pub fn store_client(&self) -> Result<HttpClient> {
        let client = self
            .client_builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpClient::with_attempts(client, self.attempts))
    }

    fn client_builder(&self) -> ClientBuilder {
        let builder = Client::builder().user_agent(USER_AGENT);
        match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }
}
