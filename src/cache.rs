//! URL -> result cache with per-entry TTL.
//!
//! A read past TTL removes the entry and returns a miss; no background
//! eviction thread is required. `get`/`set` are linearizable under a
//! single `tokio::sync::Mutex`, one `Mutex`-guarded `HashMap` per owned
//! manager.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::Mutex;

struct Entry {
    inserted_at: Instant,
    data: Value,
}

pub struct ResultCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

impl ResultCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::from_secs(ttl_secs),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached result for `url` if present and within TTL.
    /// A stale entry is dropped on the same pass that observes it.
    pub async fn get(&self, url: &str) -> Option<Value> {
        let mut entries = self.entries.lock().await;
        match entries.get(url) {
            Some(entry) if entry.inserted_at.elapsed() <= self.ttl => {
                Some(entry.data.clone())
            }
            Some(_) => {
                entries.remove(url);
                None
            }
            None => None,
        }
    }

    /// Atomically overwrite any existing entry for `url` with a fresh
    /// timestamp.
    pub async fn set(&self, url: &str, data: Value) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            url.to_string(),
            Entry {
                inserted_at: Instant::now(),
                data,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn hit_within_ttl() {
        let cache = ResultCache::new(3600);
        cache.set("https://example.com", json!({"status": "success"})).await;
        assert_eq!(
            cache.get("https://example.com").await,
            Some(json!({"status": "success"}))
        );
    }

    #[tokio::test]
    async fn miss_when_absent() {
        let cache = ResultCache::new(3600);
        assert_eq!(cache.get("https://example.com").await, None);
    }

    #[tokio::test]
    async fn expires_past_ttl() {
        let cache = ResultCache::new(0);
        cache.set("https://example.com", json!({"status": "success"})).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert_eq!(cache.get("https://example.com").await, None);
    }

    #[tokio::test]
    async fn set_overwrites_last_writer_wins() {
        let cache = ResultCache::new(3600);
        cache.set("https://example.com", json!({"v": 1})).await;
        cache.set("https://example.com", json!({"v": 2})).await;
        assert_eq!(cache.get("https://example.com").await, Some(json!({"v": 2})));
    }
}
