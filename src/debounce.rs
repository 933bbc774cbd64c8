//! Debounced callbacks
//!
//! A [`Debounced`] delays its callback until calls have been quiet for the
//! configured delay. Each call cancels the pending one and schedules a new
//! one, so only the last call of a burst runs. The pending timer belongs to
//! the instance: two wrappers never cancel each other.

use futures::future::BoxFuture;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::DEFAULT_DEBOUNCE;

type Callback<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

/// Wraps an async callback so that bursts of calls collapse into one.
pub struct Debounced<T> {
    delay: Duration,
    callback: Callback<T>,
    pending: Mutex<Option<CancellationToken>>,
}

impl<T: Send + 'static> Debounced<T> {
    /// Create a wrapper with the given delay
    pub fn new<F>(delay: Duration, callback: F) -> Self
    where
        F: Fn(T) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        Self {
            delay,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    /// Create a wrapper with the default 300ms delay
    pub fn with_default_delay<F>(callback: F) -> Self
    where
        F: Fn(T) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        Self::new(DEFAULT_DEBOUNCE, callback)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule the callback, cancelling any call still waiting.
    ///
    /// Must be called from within a tokio runtime. Nothing is returned to the
    /// caller; the callback runs on its own task once the delay elapses.
    pub fn call(&self, args: T) {
        let token = CancellationToken::new();
        {
            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(previous) = pending.replace(token.clone()) {
                previous.cancel();
            }
        }

        let callback = Arc::clone(&self.callback);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!("debounced call superseded");
                }
                _ = tokio::time::sleep(delay) => {
                    callback(args).await;
                }
            }
        });
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = pending.take() {
            token.cancel();
        }
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = pending.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) -> BoxFuture<'static, ()>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let callback = move |value: u32| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().unwrap().push(value);
            }
            .boxed()
        };
        (calls, callback)
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_only_last_call_runs() {
        let (calls, callback) = recorder();
        let debounced = Debounced::new(Duration::from_millis(300), callback);

        debounced.call(1);
        tokio::time::sleep(Duration::from_millis(100)).await;
        debounced.call(2);
        tokio::time::sleep(Duration::from_millis(299)).await;
        debounced.call(3);

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(calls.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*calls.lock().unwrap(), vec![3]);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_spaced_calls_all_run() {
        let (calls, callback) = recorder();
        let debounced = Debounced::with_default_delay(callback);
        assert_eq!(debounced.delay(), Duration::from_millis(300));

        debounced.call(1);
        tokio::time::sleep(Duration::from_millis(350)).await;
        debounced.call(2);
        tokio::time::sleep(Duration::from_millis(350)).await;

        assert_eq!(*calls.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_instances_do_not_interfere() {
        let (calls_a, callback_a) = recorder();
        let (calls_b, callback_b) = recorder();
        let a = Debounced::new(Duration::from_millis(300), callback_a);
        let b = Debounced::new(Duration::from_millis(300), callback_b);

        a.call(1);
        b.call(2);
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(*calls_a.lock().unwrap(), vec![1]);
        assert_eq!(*calls_b.lock().unwrap(), vec![2]);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_cancel_and_drop() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let debounced = Debounced::new(Duration::from_millis(300), move |()| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            .boxed()
        });

        debounced.call(());
        debounced.cancel();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        debounced.call(());
        drop(debounced);
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
