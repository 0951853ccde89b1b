//! Look-aside caching: key derivation, TTL storage, and the orchestrator.
//!
//! The cache holds derived, expendable copies of store rows. Consistency is
//! enforced by deleting keys after every committed write, never by updating
//! entries in place; the next read repopulates lazily.

pub mod config;
pub mod keys;
pub mod layer;
mod lock;
pub mod store;

pub use config::CacheConfig;
pub use keys::CacheKey;
pub use layer::CacheLayer;
pub use store::{CacheError, CacheStore, MemoryStore};
