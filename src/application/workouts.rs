//! Workout reads and writes with cache orchestration.

use std::sync::Arc;

use crate::application::error::AppError;
use crate::application::repos::{
    CreateWorkoutParams, RepoError, UpdateWorkoutParams, WorkoutsRepo,
};
use crate::cache::{CacheKey, CacheLayer};
use crate::domain::entities::{WorkoutDetailRow, WorkoutRecord};

pub struct WorkoutService {
    workouts: Arc<dyn WorkoutsRepo>,
    cache: Arc<CacheLayer>,
}

impl WorkoutService {
    pub fn new(workouts: Arc<dyn WorkoutsRepo>, cache: Arc<CacheLayer>) -> Self {
        Self { workouts, cache }
    }

    /// Cached listing of one user's workouts, in store order.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<WorkoutRecord>, AppError> {
        let rows = self
            .cache
            .read_through(&CacheKey::WorkoutsByUser(user_id), || {
                self.workouts.list_for_user(user_id)
            })
            .await?;
        Ok(rows)
    }

    /// Cached flat join of a workout with its exercises.
    ///
    /// The empty row set for an unknown workout is cached like any other
    /// result so repeated misses do not thrash the store, but it surfaces
    /// as not-found to the caller.
    pub async fn details(&self, workout_id: i64) -> Result<Vec<WorkoutDetailRow>, AppError> {
        let rows = self
            .cache
            .read_through(&CacheKey::WorkoutDetail(workout_id), || {
                self.workouts.detail_rows(workout_id)
            })
            .await?;
        if rows.is_empty() {
            return Err(AppError::not_found("workout"));
        }
        Ok(rows)
    }

    /// Create the workout and its exercises, then drop the caches the new
    /// rows made stale. Invalidation runs strictly after commit.
    pub async fn create(&self, params: CreateWorkoutParams) -> Result<WorkoutRecord, AppError> {
        let record = self.workouts.create(params).await?;
        self.cache
            .invalidate(&[
                CacheKey::WorkoutDetail(record.id),
                CacheKey::WorkoutsByUser(record.user_id),
            ])
            .await;
        Ok(record)
    }

    /// Replace the workout's scalar fields and its whole exercise
    /// collection, then invalidate. The owner is resolved after the write
    /// to clear the per-user listing.
    pub async fn update(&self, params: UpdateWorkoutParams) -> Result<(), AppError> {
        let workout_id = params.id;
        match self.workouts.update(params).await {
            Ok(()) => {}
            Err(RepoError::NotFound) => {
                return Err(AppError::not_found("workout"));
            }
            Err(err) => return Err(err.into()),
        }

        let mut stale = vec![CacheKey::WorkoutDetail(workout_id)];
        if let Some(owner) = self.workouts.owner_of(workout_id).await? {
            stale.push(CacheKey::WorkoutsByUser(owner));
        }
        self.cache.invalidate(&stale).await;
        Ok(())
    }

    /// Delete the workout and its exercises. The owner is read before the
    /// transaction begins; it is unrecoverable once the parent row is gone.
    pub async fn delete(&self, workout_id: i64) -> Result<(), AppError> {
        let owner = self
            .workouts
            .owner_of(workout_id)
            .await?
            .ok_or(AppError::not_found("workout"))?;

        self.workouts.delete(workout_id).await?;
        self.cache
            .invalidate(&[
                CacheKey::WorkoutDetail(workout_id),
                CacheKey::WorkoutsByUser(owner),
            ])
            .await;
        Ok(())
    }
}
