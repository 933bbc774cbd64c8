//! Registry search backends
//!
//! The widget only talks to a [`SearchBackend`]. [`RemoteRegistry`] queries
//! the real endpoint over HTTP; [`FixtureRegistry`] serves bundled sample
//! data and stands in for it in tests and offline demos.

pub mod fixture;
pub mod types;

use async_trait::async_trait;
use std::time::Duration;

use crate::config::{DEFAULT_ENDPOINT, DEFAULT_FETCH_TIMEOUT};
use crate::error::{Result, WidgetError};
use crate::fetch::{fetch_with_timeout, with_timeout};
use tokio::time::Instant;

pub use fixture::FixtureRegistry;
pub use types::{ResultPage, SearchResult};

/// Source of search results for a free-text query
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str) -> Result<ResultPage>;
}

/// HTTP client for the registry search endpoint
#[derive(Debug, Clone)]
pub struct RemoteRegistry {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl RemoteRegistry {
    /// Create a client for `endpoint` with the given request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Self::build_http_client()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// Client for the public endpoint with the default timeout
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_FETCH_TIMEOUT)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn build_http_client() -> Result<reqwest::Client> {
        let user_agent = Self::format_user_agent();
        tracing::debug!("Creating HTTP client with User-Agent: {}", user_agent);

        reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|source| WidgetError::Transport {
                url: DEFAULT_ENDPOINT.to_string(),
                source,
            })
    }

    fn format_user_agent() -> String {
        format!(
            "{}/{} ({})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_REPOSITORY")
        )
    }

    /// Full request URL for `query`
    pub fn query_url(&self, query: &str) -> Result<reqwest::Url> {
        reqwest::Url::parse_with_params(&self.endpoint, &[("q", query)])
            .map_err(|e| WidgetError::InvalidEndpoint(format!("{}: {e}", self.endpoint)))
    }

    /// Request the first page for `query`. The timeout covers the whole
    /// exchange, body included.
    async fn fetch_page(&self, query: &str) -> Result<ResultPage> {
        let url = self.query_url(query)?;
        let deadline = Instant::now() + self.timeout;

        let response = fetch_with_timeout(&self.client, url.as_str(), self.timeout).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::Status {
                url: url.to_string(),
                status,
            });
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        let body = with_timeout(url.as_str(), remaining, async {
            response
                .bytes()
                .await
                .map_err(|source| WidgetError::Transport {
                    url: url.to_string(),
                    source,
                })
        })
        .await?;

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl SearchBackend for RemoteRegistry {
    async fn search(&self, query: &str) -> Result<ResultPage> {
        tracing::debug!(endpoint = %self.endpoint, query, "querying registry");
        let page = self.fetch_page(query).await?;
        tracing::debug!(
            results = page.len(),
            total = page.total_results,
            "registry answered"
        );
        Ok(page)
    }
}
