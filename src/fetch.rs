//! Timeout-bounded HTTP requests
//!
//! The request and a timer run concurrently and the first one to settle
//! wins. The losing future is dropped, which for reqwest closes the
//! connection instead of leaving the request running unobserved.

use std::future::Future;
use std::time::Duration;

use crate::config::DEFAULT_FETCH_TIMEOUT;
use crate::error::{Result, WidgetError};

/// Race `fut` against a `timeout` timer.
///
/// `url` only labels the timeout error.
pub async fn with_timeout<T, F>(url: &str, timeout: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        result = fut => result,
        _ = tokio::time::sleep(timeout) => {
            tracing::debug!(url, timeout_ms = timeout.as_millis() as u64, "request timed out");
            Err(WidgetError::Timeout {
                url: url.to_string(),
                timeout,
            })
        }
    }
}

/// GET `url`, failing with [`WidgetError::Timeout`] if no response arrives
/// within `timeout`.
///
/// Transport errors are propagated as [`WidgetError::Transport`]. The HTTP
/// status is not inspected here.
pub async fn fetch_with_timeout(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<reqwest::Response> {
    let request = async {
        client
            .get(url)
            .send()
            .await
            .map_err(|source| WidgetError::Transport {
                url: url.to_string(),
                source,
            })
    };
    with_timeout(url, timeout, request).await
}

/// [`fetch_with_timeout`] with the default one second timeout
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<reqwest::Response> {
    fetch_with_timeout(client, url, DEFAULT_FETCH_TIMEOUT).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_fast_future_wins() {
        let result = with_timeout("fast", Duration::from_millis(1000), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(42)
        })
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_slow_future_times_out_and_is_dropped() {
        let dropped = Arc::new(AtomicBool::new(false));
        let flag = DropFlag(Arc::clone(&dropped));

        let result: Result<()> = with_timeout("slow", Duration::from_millis(1000), async move {
            let _flag = flag;
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;

        match result {
            Err(WidgetError::Timeout { url, timeout }) => {
                assert_eq!(url, "slow");
                assert_eq!(timeout, Duration::from_millis(1000));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_inner_error_propagates() {
        let result: Result<()> = with_timeout("bad", Duration::from_millis(1000), async {
            Err(WidgetError::Decode(
                serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
            ))
        })
        .await;
        assert!(matches!(result, Err(WidgetError::Decode(_))));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let client = reqwest::Client::new();
        let err = fetch_with_timeout(&client, "not a url", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, WidgetError::Transport { .. }));

        // The cause is only reachable through `source()`
        assert_eq!(err.to_string(), "Request to not a url failed");
        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert!(!err.to_string().contains(&cause));
    }
}
