use std::time::Instant;

use tokio::time::{interval, Duration};

use crate::limiter::rate_limiter::RateLimiterStore;

pub const EVICTION_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically drops rate limiter entries with no hits left in their window.
pub async fn start_rate_limit_eviction_task(limiter: RateLimiterStore) {
    let mut interval = interval(EVICTION_INTERVAL);

    loop {
        interval.tick().await;

        let removed = limiter.evict_idle(Instant::now());
        if removed > 0 {
            tracing::debug!(
                "Evicted {} idle rate limit entries ({} still tracked)",
                removed,
                limiter.tracked_keys()
            );
        }
    }
}
