use anyhow::{bail, Context, Result};
use reqwest::StatusCode;
use serde_json::Value as JsonValue;
use std::str::FromStr;
use tracing::debug;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_WEB_BASE: &str = "https://github.com";
const USER_AGENT: &str = concat!("codescribe/", env!("CARGO_PKG_VERSION"));

/// `owner/name` pair identifying a repository. Parses both the bare form
/// and full GitHub URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoRef {
    type Err = anyhow::Error;

    fn from_str(reference: &str) -> Result<Self> {
        let trimmed = reference
            .trim()
            .trim_start_matches("https://github.com/")
            .trim_start_matches("http://github.com/")
            .trim_end_matches(".git")
            .trim_matches('/');

        let mut parts = trimmed.split('/');
        let (Some(owner), Some(name), None) = (parts.next(), parts.next(), parts.next()) else {
            bail!("expected owner/repo or a GitHub URL, got {:?}", reference);
        };
        if owner.is_empty() || name.is_empty() {
            bail!("expected owner/repo or a GitHub URL, got {:?}", reference);
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// Thin client over the GitHub REST and archive-download endpoints. Base
/// URLs are injectable so tests can point it at a local server.
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    web_base: String,
}

impl GithubClient {
    pub fn new() -> Result<Self> {
        Self::with_base_urls(DEFAULT_API_BASE, DEFAULT_WEB_BASE)
    }

    pub fn with_base_urls(api_base: &str, web_base: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("could not build the HTTP client")?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            web_base: web_base.trim_end_matches('/').to_string(),
        })
    }

    /// Whether the repository exists and is visible to us.
    pub async fn repository_exists(&self, repo: &RepoRef) -> Result<bool> {
        let url = format!("{}/repos/{}/{}", self.api_base, repo.owner, repo.name);
        let response = self
            .http
            .head(&url)
            .send()
            .await
            .with_context(|| format!("could not reach {}", url))?;

        Ok(response.status() == StatusCode::OK)
    }

    /// Repository metadata, or `None` when it does not exist.
    pub async fn repository_info(&self, repo: &RepoRef) -> Result<Option<JsonValue>> {
        let url = format!("{}/repos/{}/{}", self.api_base, repo.owner, repo.name);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("could not reach {}", url))?;

        if response.status() != StatusCode::OK {
            return Ok(None);
        }

        let info = response
            .json()
            .await
            .context("malformed repository metadata")?;
        Ok(Some(info))
    }

    /// Downloads the repository as a ZIP archive, trying the `main` branch
    /// first and falling back to `master`.
    pub async fn download_archive(&self, repo: &RepoRef) -> Result<Vec<u8>> {
        for branch in ["main", "master"] {
            let url = format!(
                "{}/{}/{}/archive/refs/heads/{}.zip",
                self.web_base, repo.owner, repo.name, branch
            );

            let response = self
                .http
                .get(&url)
                .send()
                .await
                .with_context(|| format!("could not reach {}", url))?;

            if response.status() == StatusCode::OK {
                let bytes = response
                    .bytes()
                    .await
                    .context("failed while downloading the repository archive")?;
                return Ok(bytes.to_vec());
            }

            debug!(
                "no {} branch archive for {}/{} (HTTP {})",
                branch,
                repo.owner,
                repo.name,
                response.status()
            );
        }

        bail!(
            "could not download an archive for {}/{} from the main or master branch",
            repo.owner,
            repo.name
        );
    }
}
