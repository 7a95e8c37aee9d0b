use std::{
    collections::VecDeque,
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;

/// Result of asking the limiter to admit one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

/// Sliding log: the instants of every admitted request still inside the window.
#[derive(Debug)]
struct SlidingLog {
    hits: VecDeque<Instant>,
    last_seen: Instant,
}

impl SlidingLog {
    fn new(now: Instant) -> Self {
        Self {
            hits: VecDeque::new(),
            last_seen: now,
        }
    }

    fn prune(&mut self, window: Duration, now: Instant) {
        while let Some(&oldest) = self.hits.front() {
            if now.saturating_duration_since(oldest) >= window {
                self.hits.pop_front();
            } else {
                break;
            }
        }
    }

    fn try_acquire(&mut self, window: Duration, limit: u32, now: Instant) -> RateDecision {
        self.last_seen = now;
        self.prune(window, now);

        if self.hits.len() < limit as usize {
            self.hits.push_back(now);
            return RateDecision::Allowed {
                remaining: limit - self.hits.len() as u32,
            };
        }

        // The oldest hit is the next to leave the window.
        let retry_after = self
            .hits
            .front()
            .map(|oldest| window.saturating_sub(now.saturating_duration_since(*oldest)))
            .unwrap_or(window);

        RateDecision::Limited { retry_after }
    }

    fn is_idle(&self, window: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.last_seen) >= window
            && self
                .hits
                .back()
                .is_none_or(|newest| now.saturating_duration_since(*newest) >= window)
    }
}

type Key = String;

/// Per-key admission control: at most `limit` admitted requests per key in any
/// trailing `window`.
#[derive(Clone)]
pub struct RateLimiterStore {
    map: Arc<DashMap<Key, Mutex<SlidingLog>>>,
    window: Duration,
    limit: u32,
}

impl RateLimiterStore {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            window,
            limit,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    /// Same as [`check`](Self::check) with an explicit clock reading.
    ///
    /// The map guard is held while the log is locked, so eviction cannot drop
    /// a log between lookup and update.
    pub fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        if let Some(log) = self.map.get(key) {
            return log.lock().try_acquire(self.window, self.limit, now);
        }

        let log = self
            .map
            .entry(key.to_string())
            .or_insert_with(|| Mutex::new(SlidingLog::new(now)));
        log.lock().try_acquire(self.window, self.limit, now)
    }

    /// Drops keys with no hits inside the window. Returns how many were removed.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let before = self.map.len();
        let window = self.window;
        self.map.retain(|_, log| !log.lock().is_idle(window, now));
        before.saturating_sub(self.map.len())
    }

    pub fn tracked_keys(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn admits_up_to_the_limit_then_rejects() {
        let limiter = RateLimiterStore::new(10, HOUR);
        let start = Instant::now();

        for i in 0..10 {
            let decision = limiter.check_at("203.0.113.7", start + Duration::from_secs(i));
            assert_eq!(decision, RateDecision::Allowed { remaining: 9 - i as u32 });
        }

        let eleventh = limiter.check_at("203.0.113.7", start + Duration::from_secs(10));
        assert!(!eleventh.is_allowed());
    }

    #[test]
    fn keys_are_independent() {
        let limiter = RateLimiterStore::new(2, HOUR);
        let now = Instant::now();

        assert!(limiter.check_at("a", now).is_allowed());
        assert!(limiter.check_at("a", now).is_allowed());
        assert!(!limiter.check_at("a", now).is_allowed());

        assert!(limiter.check_at("b", now).is_allowed());
    }

    #[test]
    fn window_slides_rather_than_resets() {
        let limiter = RateLimiterStore::new(2, HOUR);
        let start = Instant::now();

        assert!(limiter.check_at("a", start).is_allowed());
        assert!(limiter.check_at("a", start + Duration::from_secs(1800)).is_allowed());

        // Only the first hit has aged out an hour later.
        assert!(limiter.check_at("a", start + HOUR).is_allowed());
        assert!(!limiter.check_at("a", start + HOUR + Duration::from_secs(1)).is_allowed());
        assert!(limiter.check_at("a", start + HOUR + Duration::from_secs(1800)).is_allowed());
    }

    #[test]
    fn retry_after_counts_down_to_the_oldest_hit() {
        let limiter = RateLimiterStore::new(1, HOUR);
        let start = Instant::now();

        assert!(limiter.check_at("a", start).is_allowed());

        let decision = limiter.check_at("a", start + Duration::from_secs(600));
        assert_eq!(
            decision,
            RateDecision::Limited { retry_after: Duration::from_secs(3000) }
        );
    }

    #[test]
    fn rejected_requests_do_not_extend_the_block() {
        let limiter = RateLimiterStore::new(1, HOUR);
        let start = Instant::now();

        assert!(limiter.check_at("a", start).is_allowed());
        for minute in 1..60 {
            assert!(!limiter.check_at("a", start + Duration::from_secs(minute * 60)).is_allowed());
        }
        assert!(limiter.check_at("a", start + HOUR).is_allowed());
    }

    #[test]
    fn concurrent_requests_from_one_address_share_the_quota() {
        let limiter = RateLimiterStore::new(10, HOUR);

        let admitted: usize = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..50)
                .map(|_| scope.spawn(|| limiter.check("198.51.100.20").is_allowed()))
                .collect();

            workers
                .into_iter()
                .map(|worker| worker.join().unwrap())
                .filter(|allowed| *allowed)
                .count()
        });

        assert_eq!(admitted, 10);
        assert_eq!(limiter.tracked_keys(), 1);
        assert!(!limiter.check("198.51.100.20").is_allowed());
    }

    #[test]
    fn reports_its_configuration() {
        let limiter = RateLimiterStore::new(10, HOUR);

        assert_eq!(limiter.limit(), 10);
        assert_eq!(limiter.window(), HOUR);
    }

    #[test]
    fn evicts_only_idle_keys() {
        let limiter = RateLimiterStore::new(5, HOUR);
        let start = Instant::now();

        limiter.check_at("old", start);
        limiter.check_at("fresh", start + Duration::from_secs(3000));
        assert_eq!(limiter.tracked_keys(), 2);

        let removed = limiter.evict_idle(start + HOUR + Duration::from_secs(1));
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_keys(), 1);
    }
}
