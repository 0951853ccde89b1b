//! Cache configuration: entry capacity and per-key-class TTLs.

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::cache::keys::CacheKey;

const DEFAULT_CAPACITY: usize = 1024;
const DEFAULT_WORKOUTS_TTL_SECS: u64 = 300;
const DEFAULT_USERS_TTL_SECS: u64 = 300;
const DEFAULT_SETTINGS_TTL_SECS: u64 = 600;

/// Tunables for the look-aside cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries held by the in-process store.
    pub capacity: usize,
    /// TTL for workout lists and detail rows.
    pub workouts_ttl: Duration,
    /// TTL for the all-users listing.
    pub users_ttl: Duration,
    /// TTL for per-user settings (longer: settings change rarely).
    pub settings_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            workouts_ttl: Duration::from_secs(DEFAULT_WORKOUTS_TTL_SECS),
            users_ttl: Duration::from_secs(DEFAULT_USERS_TTL_SECS),
            settings_ttl: Duration::from_secs(DEFAULT_SETTINGS_TTL_SECS),
        }
    }
}

impl CacheConfig {
    /// TTL applied to entries of the given key class.
    pub fn ttl_for(&self, key: &CacheKey) -> Duration {
        match key {
            CacheKey::WorkoutsByUser(_) | CacheKey::WorkoutDetail(_) => self.workouts_ttl,
            CacheKey::SettingsByUser(_) => self.settings_ttl,
            CacheKey::AllUsers => self.users_ttl,
        }
    }

    /// Entry capacity as `NonZeroUsize`, clamping zero to one.
    pub fn capacity_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.capacity).unwrap_or(NonZeroUsize::MIN)
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            capacity: settings.capacity,
            workouts_ttl: Duration::from_secs(settings.workouts_ttl_seconds),
            users_ttl: Duration::from_secs(settings.users_ttl_seconds),
            settings_ttl: Duration::from_secs(settings.settings_ttl_seconds),
        }
    }
}
