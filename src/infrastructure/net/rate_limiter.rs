// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Cooperative soft limiter enforcing a minimum spacing between the starts
/// of consecutive requests to one upstream host class.
///
/// One instance is shared (via `Arc`) by every client talking to the same
/// host class. The lock is held across the sleep, so concurrent callers are
/// serialized and each observes the full spacing; it does not bound burst
/// concurrency beyond that and is not a token bucket.
pub struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    /// Suspend the caller until at least `min_interval` has elapsed since
    /// the previous call, then stamp the new request start.
    pub async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
