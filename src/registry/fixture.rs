//! Static backend serving bundled sample data

use async_trait::async_trait;
use std::time::Duration;

use super::{ResultPage, SearchBackend};
use crate::config::DEFAULT_FIXTURE_LATENCY;
use crate::error::Result;

/// First page of a real registry answer for "ganymede"
const GANYMEDE_PAGE: &str = include_str!("fixtures/ganymede.json");

/// Answers every query with the same page after a simulated latency.
#[derive(Debug, Clone)]
pub struct FixtureRegistry {
    page: ResultPage,
    latency: Duration,
}

impl FixtureRegistry {
    pub fn new(page: ResultPage, latency: Duration) -> Self {
        Self { page, latency }
    }

    /// The bundled "ganymede" sample with the default latency
    pub fn ganymede() -> Result<Self> {
        Ok(Self::new(Self::sample_page()?, DEFAULT_FIXTURE_LATENCY))
    }

    /// Parse the bundled sample page
    pub fn sample_page() -> Result<ResultPage> {
        Ok(serde_json::from_str(GANYMEDE_PAGE)?)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl SearchBackend for FixtureRegistry {
    async fn search(&self, query: &str) -> Result<ResultPage> {
        tracing::debug!(
            query,
            latency_ms = self.latency.as_millis() as u64,
            "serving fixture page"
        );
        tokio::time::sleep(self.latency).await;
        Ok(self.page.clone())
    }
}
