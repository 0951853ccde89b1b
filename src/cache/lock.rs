use std::sync::{RwLock, RwLockWriteGuard};

use tracing::warn;

/// Acquire a write guard, recovering from poisoning.
///
/// A panic while another thread held the lock leaves at worst a stale or
/// missing cache entry, which the TTL already bounds.
pub(crate) fn write_guard<'a, T>(
    lock: &'a RwLock<T>,
    op: &'static str,
) -> RwLockWriteGuard<'a, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!(
                target: "stridelog::cache",
                op,
                "recovered poisoned cache lock"
            );
            poisoned.into_inner()
        }
    }
}
