//! HTTP client for the project-tracking API.
//!
//! Requests are issued one at a time; callers await each before the next.
//! Paths are resolved against the configured base URL, while `*_link` values
//! returned by the service are absolute and used as-is.

mod types;

pub use types::*;

use std::collections::HashSet;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ReportConfig;
use crate::models::Milestone;

/// Tracker request errors.
///
/// Network failures and timeouts surface as [`ClientError::Http`]; the rest
/// are non-success replies from the tracker, carrying the requested URL.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Tracker request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No such tracker record: {0}")]
    NotFound(String),

    #[error("Tracker rejected request {0}")]
    BadRequest(String),

    #[error("Tracker refused credentials; set REDGREEN_API_TOKEN or api_token")]
    Unauthorized,

    #[error("Tracker error {0}")]
    Server(String),

    #[error("Collection page {0} was already fetched")]
    PageCycle(String),
}

/// HTTP client for the tracker API.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    base_url: String,
    api_token: Option<String>,
    client: Client,
}

impl TrackerClient {
    /// Create with explicit configuration and reqwest defaults.
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        Self::with_client(base_url, api_token, Client::new())
    }

    fn with_client(base_url: impl Into<String>, api_token: Option<String>, client: Client) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            client,
        }
    }

    /// Create from report configuration, applying its request timeout.
    pub fn from_config(config: &ReportConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(
            config.api_url.clone(),
            config.api_token.clone(),
            client,
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path_or_link: &str) -> String {
        if path_or_link.starts_with("http://") || path_or_link.starts_with("https://") {
            path_or_link.to_string()
        } else {
            format!("{}{}", self.base_url, path_or_link)
        }
    }

    /// Build a request with optional auth header.
    fn request(&self, method: Method, path_or_link: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, self.url(path_or_link));
        if let Some(ref token) = self.api_token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Decode a tracker reply for `url`, mapping error statuses to ClientError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        url: &str,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = if body.trim().is_empty() {
            url.to_string()
        } else {
            format!("{}: {}", url, body.trim())
        };
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(url.to_string())),
            StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(detail)),
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            _ => Err(ClientError::Server(format!("{} for {}", status, detail))),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path_or_link: &str) -> Result<T, ClientError> {
        let url = self.url(path_or_link);
        tracing::debug!("GET {}", url);
        let response = self.request(Method::GET, path_or_link).send().await?;
        self.handle_response(&url, response).await
    }

    /// Fetch every entry of a collection, following `next_collection_link`.
    /// A next link pointing back at a page already fetched is an error.
    async fn collect<T: DeserializeOwned>(&self, link: &str) -> Result<Vec<T>, ClientError> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        let mut next = Some(link.to_string());
        while let Some(link) = next {
            if !seen.insert(self.url(&link)) {
                return Err(ClientError::PageCycle(link));
            }
            let page: Collection<T> = self.get(&link).await?;
            entries.extend(page.entries);
            next = page.next_collection_link;
        }
        Ok(entries)
    }

    // ============================================================
    // Session
    // ============================================================

    /// Check that the service is reachable and accepts our credentials.
    pub async fn login(&self) -> Result<ServiceRoot, ClientError> {
        self.get("/").await
    }

    // ============================================================
    // Project Operations
    // ============================================================

    /// Get a project by name.
    pub async fn get_project(&self, name: &str) -> Result<ProjectEntry, ClientError> {
        self.get(&format!("/{}", name)).await
    }

    /// List the release series of a project.
    pub async fn series(&self, project: &ProjectEntry) -> Result<Vec<SeriesEntry>, ClientError> {
        self.collect(&project.series_collection_link).await
    }

    /// Find a series of `project` by name.
    pub async fn find_series(
        &self,
        project: &ProjectEntry,
        name: &str,
    ) -> Result<SeriesEntry, ClientError> {
        self.series(project)
            .await?
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| {
                ClientError::NotFound(format!("series {} of project {}", name, project.name))
            })
    }

    // ============================================================
    // Specification Operations
    // ============================================================

    /// List every specification targeted at a series.
    pub async fn specifications(
        &self,
        series: &SeriesEntry,
    ) -> Result<Vec<SpecificationEntry>, ClientError> {
        self.collect(&series.all_specifications_collection_link)
            .await
    }

    pub async fn milestone(&self, link: &str) -> Result<Milestone, ClientError> {
        let entry: MilestoneEntry = self.get(link).await?;
        Ok(entry.into())
    }

    pub async fn person(&self, link: &str) -> Result<PersonEntry, ClientError> {
        self.get(link).await
    }

    // ============================================================
    // Bug Operations
    // ============================================================

    pub async fn get_bug(&self, id: u64) -> Result<BugEntry, ClientError> {
        self.get(&format!("/bugs/{}", id)).await
    }

    pub async fn bug_tasks(&self, bug: &BugEntry) -> Result<Vec<BugTaskEntry>, ClientError> {
        self.collect(&bug.bug_tasks_collection_link).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_paths_against_base_url() {
        let client = TrackerClient::new("https://api.example.com/devel/", None);
        assert_eq!(client.base_url(), "https://api.example.com/devel");
        assert_eq!(
            client.url("/bugs/1"),
            "https://api.example.com/devel/bugs/1"
        );
        assert_eq!(
            client.url("https://api.example.com/devel/~alice"),
            "https://api.example.com/devel/~alice"
        );
    }
}
