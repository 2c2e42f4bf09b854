use std::time::Duration;

use tokio::{
    sync::Mutex,
    time::{Instant, sleep},
};
use tracing::info;

pub const DEFAULT_MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(4000);

/// Single-slot gate enforcing a minimum delay between outbound LLM requests.
///
/// The slot is taken when access is granted, not when the guarded request
/// completes. Callers racing for the gate are serialised by the inner lock,
/// with no ordering guarantee beyond what tokio's mutex provides.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub async fn acquire(&self) {
        let mut last_request = self.last_request.lock().await;

        if let Some(last) = *last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                info!(
                    wait_ms = wait.as_millis() as u64,
                    "Rate limiting: waiting before next LLM request"
                );
                sleep(wait).await;
            }
        }

        *last_request = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_REQUEST_INTERVAL)
    }
}
