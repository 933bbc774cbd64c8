//! # Widget Configuration Module
//!
//! Default timings and endpoint of the search widget, and the
//! [`WidgetConfig`] that bundles them.

use std::time::Duration;

/// Id of the input the widget binds to by default
pub const DEFAULT_INPUT_ID: &str = "search-widget";

/// Registry search endpoint; the query goes in the `q` parameter
pub const DEFAULT_ENDPOINT: &str =
    "http://api.sirene.dataeng.annuaire-entreprises-infra.etalab.studio/search";

/// Quiet period before an input event triggers a search
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Upper bound on a registry request
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(1000);

/// Simulated latency of the bundled fixture backend
pub const DEFAULT_FIXTURE_LATENCY: Duration = Duration::from_millis(300);

/// Stacking order of the results container
pub const RESULTS_Z_INDEX: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub input_id: String,
    pub endpoint: String,
    pub debounce: Duration,
    pub fetch_timeout: Duration,
    pub fixture_latency: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            input_id: DEFAULT_INPUT_ID.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            fixture_latency: DEFAULT_FIXTURE_LATENCY,
        }
    }
}

impl WidgetConfig {
    pub fn with_input_id(mut self, input_id: impl Into<String>) -> Self {
        self.input_id = input_id.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}
