//! Error types for the search widget
//!
//! Only `InputNotFound` is fatal. Every other variant is produced by a
//! search backend and ends up in the widget's error panel.

use std::time::Duration;
use thiserror::Error;

/// Main error type for widget and registry operations
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Could not find input with id: {0}")]
    InputNotFound(String),

    #[error("Invalid registry endpoint {0}")]
    InvalidEndpoint(String),

    #[error("Request to {url} timed out after {}ms", .timeout.as_millis())]
    Timeout { url: String, timeout: Duration },

    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Registry returned HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode registry response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl WidgetError {
    /// Short label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            WidgetError::InputNotFound(_) => "construction",
            WidgetError::InvalidEndpoint(_) => "endpoint",
            WidgetError::Timeout { .. } => "timeout",
            WidgetError::Transport { .. } | WidgetError::Status { .. } => "transport",
            WidgetError::Decode(_) => "decode",
        }
    }
}

pub type Result<T, E = WidgetError> = std::result::Result<T, E>;
