//! TTL cache for upstream odds-API responses.
//!
//! The provider rate-limits aggressively and pre-match data moves slowly, so
//! repeated lookups within the TTL are served from memory. Time is injected
//! through the [`Clock`] trait so expiry behaviour is testable without
//! sleeping.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Source of "now" for expiry decisions.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used in production.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Thread-safe key → (JSON value, expiry) cache.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

struct CacheEntry {
    value: serde_json::Value,
    expires_at: DateTime<Utc>,
}

impl ResponseCache {
    pub fn new(ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        ResponseCache {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::seconds(ttl_secs as i64),
            clock,
        }
    }

    /// Fetch a cached response. Entries past their expiry are treated as
    /// absent; removal is left to `purge_expired`.
    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        let inner = self.inner.read().await;
        let entry = inner.get(key)?;
        if entry.expires_at <= self.clock.now() {
            return None;
        }
        Some(entry.value.clone())
    }

    pub async fn insert(&self, key: impl Into<String>, value: serde_json::Value) {
        let expires_at = self.clock.now() + self.ttl;
        let mut inner = self.inner.write().await;
        inner.insert(key.into(), CacheEntry { value, expires_at });
    }

    /// Drop all expired entries. Returns how many were removed.
    /// Called periodically from a background task.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut inner = self.inner.write().await;
        let before = inner.len();
        inner.retain(|_, entry| entry.expires_at > now);
        let removed = before - inner.len();
        if removed > 0 {
            debug!("ResponseCache purged {} expired entries", removed);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
