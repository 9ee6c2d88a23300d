//! Simulated query latency.

use std::time::Duration;

use async_trait::async_trait;

/// Async sleeping abstraction standing in for server round-trip time.
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use dashboard::query::LatencySleeper;
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
/// #[derive(Default)]
/// struct RecordingSleeper {
///     requested: Arc<Mutex<Vec<Duration>>>,
/// }
/// #[async_trait]
/// impl LatencySleeper for RecordingSleeper {
///     async fn sleep(&self, duration: Duration) {
///         self.requested.lock().expect("requested mutex").push(duration);
///     }
/// }
/// # async fn demo() {
/// let sleeper = RecordingSleeper::default();
/// sleeper.sleep(Duration::from_millis(500)).await;
/// assert_eq!(sleeper.requested.lock().expect("requested mutex").len(), 1);
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LatencySleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio timer-based sleeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl LatencySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
