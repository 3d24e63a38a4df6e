//! A [`GitHubApi`] backed by GitHub REST API over HTTPS.

#![cfg(feature = "client")]

use std::error::Error as _;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url, header};
use serde::Deserialize;
use tracing::debug;

use crate::{
    github::{ApiError, GitHubApi},
    workflow::{Credential, QualifiedRepo, release::Release},
};

/// The REST API root used when `GITHUB_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The API version sent with every request.
pub const API_VERSION: &str = "2022-11-28";

/// Settings of a [`GitHubClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// The REST API root, e.g. `https://api.github.com` or `https://ghe.example.com/api/v3`.
    pub base_url: String,
    /// The `User-Agent` header, required by GitHub.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// Reads the API root from `GITHUB_API_URL`, which the Actions runner sets for GitHub Enterprise too.
    pub fn from_env() -> Self {
        let base_url = std::env::var("GITHUB_API_URL")
            .ok()
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty());
        match base_url {
            Some(base_url) => Self {
                base_url,
                ..Self::default()
            },
            None => Self::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Calls GitHub REST API with a bearer token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: Url,
    credential: Credential,
}

impl GitHubClient {
    /// Creates a [`GitHubClient`].
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the API root is not a valid base URL, or the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, credential: Credential) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                ApiError::transport(format!("invalid API URL \"{}\"", config.base_url))
            })?;
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(|err| ApiError::transport(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url,
            credential,
        })
    }

    /// Appends percent-encoded path segments to the API root.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Builds a request for GitHub REST API.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .bearer_auth(self.credential.expose())
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn send(&self, method: Method, url: Url) -> Result<Response, ApiError> {
        debug!("{method} {url}…");

        let response = match self.request(method, url).send().await {
            Ok(response) => response,
            Err(err) => {
                return Err(match err.source() {
                    Some(source) => ApiError::transport(format!("{err}: {source}")),
                    None => ApiError::transport(err.to_string()),
                });
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(ErrorBody {
                message: Some(message),
            }) => message,
            _ => reason(status),
        };
        Err(ApiError::new(status.as_u16(), message))
    }
}

fn reason(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn list_releases(&self, repo: &QualifiedRepo) -> Result<Vec<Release>, ApiError> {
        let url = self.endpoint(&["repos", repo.owner.as_str(), repo.repo.as_str(), "releases"]);
        let response = self.send(Method::GET, url).await?;
        let status = response.status().as_u16();

        response
            .json::<Vec<Release>>()
            .await
            .map_err(|err| ApiError::new(status, format!("failed to parse releases: {err}")))
    }

    async fn delete_release(&self, repo: &QualifiedRepo, release_id: u64) -> Result<(), ApiError> {
        let id = release_id.to_string();
        let url = self.endpoint(&[
            "repos",
            repo.owner.as_str(),
            repo.repo.as_str(),
            "releases",
            id.as_str(),
        ]);
        self.send(Method::DELETE, url).await.map(drop)
    }

    async fn delete_ref(&self, repo: &QualifiedRepo, reference: &str) -> Result<(), ApiError> {
        // the endpoint already ends in `refs`
        let reference = reference.strip_prefix("refs/").unwrap_or(reference);
        let mut segments = vec!["repos", repo.owner.as_str(), repo.repo.as_str(), "git", "refs"];
        segments.extend(reference.split('/'));

        let url = self.endpoint(&segments);
        self.send(Method::DELETE, url).await.map(drop)
    }
}
