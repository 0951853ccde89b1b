//! Cache storage: the `CacheStore` contract and the in-process TTL store.
//!
//! Values are opaque strings (full JSON serializations of a row set). The
//! store never interprets them; expiry and eviction are the only policies
//! it owns.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use thiserror::Error;

use super::config::CacheConfig;
use super::lock::write_guard;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Key-value store with per-entry TTL.
///
/// Implementations are shared by every request task; all three operations
/// are suspension points. Callers treat every error as a degraded cache,
/// never as a failed request.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    /// An entry is a miss from the instant its TTL has fully elapsed.
    fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-process `CacheStore` holding entries in an LRU map.
///
/// Setting an existing key overwrites the value and resets its TTL.
/// Expired entries are dropped on access; capacity overflow evicts the
/// least recently used entry.
pub struct MemoryStore {
    entries: RwLock<LruCache<String, Entry>>,
}

impl MemoryStore {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: RwLock::new(LruCache::new(config.capacity_non_zero())),
        }
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<String> {
        let mut entries = write_guard(&self.entries, "get");
        match entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => return Some(entry.value.clone()),
            Some(_) => {}
            None => return None,
        }
        entries.pop(key);
        None
    }

    fn set_at(&self, key: &str, value: String, ttl: Duration, now: Instant) {
        let entry = Entry {
            value,
            expires_at: now + ttl,
        };
        write_guard(&self.entries, "set").put(key.to_string(), entry);
    }

    fn remove(&self, key: &str) {
        write_guard(&self.entries, "delete").pop(key);
    }

    /// Number of live (possibly expired, not yet collected) entries.
    pub fn len(&self) -> usize {
        write_guard(&self.entries, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.get_at(key, Instant::now()))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.set_at(key, value, ttl, Instant::now());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.remove(key);
        Ok(())
    }
}
