//! Per-domain sliding-window rate limiter, `max` admissions / 60s.
//!
//! A `VecDeque` of admission instants per key, evicted lazily on each
//! access rather than by a background sweep.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

const PERIOD: Duration = Duration::from_secs(60);

struct Bucket {
    admissions: VecDeque<Instant>,
}

pub struct RateLimiter {
    max_per_period: u32,
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl RateLimiter {
    pub fn new(max_per_period: u32) -> Self {
        Self {
            max_per_period,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Purge admissions older than `PERIOD`; accept and record `now` if the
    /// remaining count is under `max_per_period`. If `max_per_period` is 0,
    /// always allow and never retain state.
    pub async fn allow(&self, domain: &str) -> bool {
        if self.max_per_period == 0 {
            return true;
        }
        let now = Instant::now();
        let mut buckets = self.buckets.lock().await;
        let bucket = buckets.entry(domain.to_string()).or_insert_with(|| Bucket {
            admissions: VecDeque::new(),
        });
        while matches!(bucket.admissions.front(), Some(t) if now.duration_since(*t) > PERIOD) {
            bucket.admissions.pop_front();
        }
        if bucket.admissions.len() as u32 >= self.max_per_period {
            return false;
        }
        bucket.admissions.push_back(now);
        true
    }
}
