use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "HireProof-API";

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub returned status {status} for {resource}")]
    Status { status: u16, resource: String },
}

/// Public profile record as returned by `GET /users/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub bio: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub created_at: DateTime<Utc>,
}

/// Repository record as returned by `GET /users/{username}/repos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubRepo {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    /// Repo size metric reported by GitHub (kilobytes of the default branch).
    pub size: u64,
    pub html_url: String,
    pub updated_at: DateTime<Utc>,
    pub fork: bool,
}

/// Read-only GitHub REST client. Bearer token optional; non-2xx responses
/// are collection failures (the caller falls back to synthetic data).
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(20))
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to build HTTP client"),
            token,
        }
    }

    pub async fn fetch_user(&self, username: &str) -> Result<GithubUser, GithubError> {
        let url = format!("{GITHUB_API_URL}/users/{username}");
        let user = self.get_json::<GithubUser>(&url).await?;
        Ok(user)
    }

    /// Fetches up to 100 most-recently-updated repositories for `username`.
    pub async fn fetch_repos(&self, username: &str) -> Result<Vec<GithubRepo>, GithubError> {
        let url = format!("{GITHUB_API_URL}/users/{username}/repos?per_page=100&sort=updated");
        let repos = self.get_json::<Vec<GithubRepo>>(&url).await?;
        Ok(repos)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, GithubError> {
        let mut request = self
            .client
            .get(url)
            .header("accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(GithubError::Status {
                status: status.as_u16(),
                resource: url.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}
