//! The read-through / invalidate-on-write orchestrator.
//!
//! Every cacheable read goes through [`CacheLayer::read_through`]; every
//! committed write calls [`CacheLayer::invalidate`] afterwards. Cache
//! failures degrade latency, never correctness: they are logged, counted,
//! and swallowed, and the read falls back to the backing loader.

use std::future::Future;
use std::sync::Arc;

use metrics::counter;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::config::CacheConfig;
use super::keys::CacheKey;
use super::store::CacheStore;

pub struct CacheLayer {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
}

impl CacheLayer {
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Serve `key` from the cache, falling back to `load` on a miss.
    ///
    /// A hit returns the cached serialization verbatim, without touching
    /// the store of record. A miss runs the loader, caches the result
    /// best-effort under the key class TTL, and returns it. Concurrent
    /// misses for the same key may each run the loader; writes are rare
    /// enough that the redundant repopulation is accepted.
    pub async fn read_through<T, E, F, Fut>(&self, key: &CacheKey, load: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let rendered = key.to_string();

        match self.store.get(&rendered).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    counter!("stridelog_cache_hit_total").increment(1);
                    debug!(target: "stridelog::cache", key = %rendered, "cache hit");
                    return Ok(value);
                }
                Err(error) => {
                    warn!(
                        target: "stridelog::cache",
                        key = %rendered,
                        error = %error,
                        "discarding undecodable cache entry"
                    );
                    if let Err(error) = self.store.delete(&rendered).await {
                        warn!(target: "stridelog::cache", key = %rendered, error = %error, "cache delete failed");
                    }
                }
            },
            Ok(None) => {}
            Err(error) => {
                warn!(
                    target: "stridelog::cache",
                    key = %rendered,
                    error = %error,
                    "cache read failed, serving from store"
                );
            }
        }

        counter!("stridelog_cache_miss_total").increment(1);
        let value = load().await?;

        match serde_json::to_string(&value) {
            Ok(raw) => {
                let ttl = self.config.ttl_for(key);
                if let Err(error) = self.store.set(&rendered, raw, ttl).await {
                    warn!(
                        target: "stridelog::cache",
                        key = %rendered,
                        error = %error,
                        "cache populate failed"
                    );
                }
            }
            Err(error) => {
                warn!(
                    target: "stridelog::cache",
                    key = %rendered,
                    error = %error,
                    "cache populate skipped, value not serializable"
                );
            }
        }

        Ok(value)
    }

    /// Delete every key that a committed write may have left stale.
    ///
    /// Callers invoke this strictly after commit; a crash in between
    /// leaves entries that self-heal at TTL expiry. Deletion is best
    /// effort and never fails the request.
    pub async fn invalidate(&self, keys: &[CacheKey]) {
        for key in keys {
            let rendered = key.to_string();
            match self.store.delete(&rendered).await {
                Ok(()) => {
                    counter!("stridelog_cache_invalidation_total").increment(1);
                    debug!(target: "stridelog::cache", key = %rendered, "cache invalidated");
                }
                Err(error) => {
                    warn!(
                        target: "stridelog::cache",
                        key = %rendered,
                        error = %error,
                        "cache invalidation failed, entry expires by TTL"
                    );
                }
            }
        }
    }
}
