//! Cache key definitions.
//!
//! Every cacheable read derives its key from request parameters alone, so
//! the same entity always maps to the same string. Writers render the same
//! keys to delete them after commit.

use std::fmt;

/// Identifies one cacheable row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Every workout owned by one user.
    WorkoutsByUser(i64),
    /// Flat workout ⋈ exercises join for one workout.
    WorkoutDetail(i64),
    /// Settings row (or the synthesized default) for one user.
    SettingsByUser(i64),
    /// The full user listing.
    AllUsers,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::WorkoutsByUser(user_id) => write!(f, "workouts:user:{user_id}"),
            CacheKey::WorkoutDetail(workout_id) => write!(f, "workout:{workout_id}"),
            CacheKey::SettingsByUser(user_id) => write!(f, "settings:user:{user_id}"),
            CacheKey::AllUsers => f.write_str("users:all"),
        }
    }
}
