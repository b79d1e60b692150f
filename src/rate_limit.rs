//! Fixed courtesy delay between sequential OpenAlex requests.

use tokio::time::Duration;

/// Default pause before each per-item traversal request.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(101);

/// Sleeps a fixed interval before a request.
///
/// This keeps a single sequential caller under the OpenAlex rate limit. It is
/// not a token bucket: callers sharing one budget from several tasks are not
/// coordinated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourtesyDelay {
    interval: Duration,
}

impl CourtesyDelay {
    /// Create a delay of the given interval. A zero interval never sleeps.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait out the interval.
    pub async fn wait(&self) {
        if self.interval.is_zero() {
            return;
        }
        tracing::trace!(delay_ms = self.interval.as_millis() as u64, "courtesy delay");
        tokio::time::sleep(self.interval).await;
    }
}

impl Default for CourtesyDelay {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY)
    }
}
