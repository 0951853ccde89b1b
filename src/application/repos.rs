//! Repository traits describing persistence adapters.
//!
//! Services depend on these traits, never on the Postgres implementation,
//! so tests can substitute in-memory fakes and the cache orchestration can
//! be exercised without a database.

use async_trait::async_trait;
use thiserror::Error;
use time::Date;

use crate::domain::entities::{
    ProfileRecord, SettingsRecord, StepsLogRecord, UserRecord, WorkoutDetailRow, WorkoutRecord,
};
use crate::domain::types::{Theme, WorkoutType};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Child exercise payload for a create or replace write. Fields left empty
/// by the client persist as null.
#[derive(Debug, Clone, Default)]
pub struct NewExercise {
    pub exercise_name: Option<String>,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
    pub duration_min: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct CreateWorkoutParams {
    pub user_id: i64,
    pub workout_type: WorkoutType,
    pub name: String,
    pub date: Date,
    pub duration_min: Option<i32>,
    pub notes: Option<String>,
    pub exercises: Vec<NewExercise>,
}

#[derive(Debug, Clone)]
pub struct UpdateWorkoutParams {
    pub id: i64,
    pub workout_type: WorkoutType,
    pub name: String,
    pub date: Date,
    pub duration_min: Option<i32>,
    pub notes: Option<String>,
    pub exercises: Vec<NewExercise>,
}

#[async_trait]
pub trait WorkoutsRepo: Send + Sync {
    /// All workouts owned by one user, in store order.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<WorkoutRecord>, RepoError>;

    /// Flat workout ⋈ exercises join; empty when the workout is unknown.
    async fn detail_rows(&self, workout_id: i64) -> Result<Vec<WorkoutDetailRow>, RepoError>;

    /// Owning user of a workout, when it exists.
    async fn owner_of(&self, workout_id: i64) -> Result<Option<i64>, RepoError>;

    /// Insert the workout and its child rows in one transaction.
    async fn create(&self, params: CreateWorkoutParams) -> Result<WorkoutRecord, RepoError>;

    /// Update scalar fields and replace the whole child collection in one
    /// transaction. `NotFound` when the workout does not exist.
    async fn update(&self, params: UpdateWorkoutParams) -> Result<(), RepoError>;

    /// Delete child rows then the parent in one transaction.
    async fn delete(&self, workout_id: i64) -> Result<(), RepoError>;
}

#[derive(Debug, Clone)]
pub struct UpsertStepsParams {
    pub user_id: i64,
    pub step_date: Date,
    pub steps_count: i32,
    pub distance_km: Option<f64>,
    pub calories_burned: Option<i32>,
}

#[async_trait]
pub trait StepsRepo: Send + Sync {
    /// Insert or overwrite the log for (user, date); the conflict path
    /// replaces the numeric fields and refreshes the row timestamp.
    async fn upsert(&self, params: UpsertStepsParams) -> Result<StepsLogRecord, RepoError>;
}

#[derive(Debug, Clone)]
pub struct UpsertSettingsParams {
    pub user_id: i64,
    pub theme: Theme,
    pub language: String,
    pub notifications: crate::domain::entities::NotificationFlags,
}

#[async_trait]
pub trait SettingsRepo: Send + Sync {
    async fn find_for_user(&self, user_id: i64) -> Result<Option<SettingsRecord>, RepoError>;
    async fn upsert(&self, params: UpsertSettingsParams) -> Result<SettingsRecord, RepoError>;
}

#[derive(Debug, Clone)]
pub struct SignupParams {
    pub name: String,
    pub email: String,
    pub credential_hash: String,
    pub role: String,
    pub location: String,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub goal: Option<String>,
    pub bmi: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileParams {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub location: String,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub goal: Option<String>,
    pub bmi: Option<f64>,
}

#[async_trait]
pub trait UsersRepo: Send + Sync {
    async fn list_all(&self) -> Result<Vec<UserRecord>, RepoError>;

    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, RepoError>;

    /// Insert the user row and its fitness profile in one transaction.
    /// `Duplicate` when the email is already registered.
    async fn create_account(&self, params: SignupParams) -> Result<UserRecord, RepoError>;

    async fn load_profile(&self, user_id: i64) -> Result<Option<ProfileRecord>, RepoError>;

    /// Update user scalars and upsert the fitness profile in one
    /// transaction, so name and bmi never drift apart under a race.
    async fn update_profile(&self, params: UpdateProfileParams) -> Result<(), RepoError>;
}

/// One month of the yearly workout trend; `month` is 1-based.
#[derive(Debug, Clone, Copy)]
pub struct MonthWorkoutCount {
    pub month: i32,
    pub workouts: i64,
}

#[async_trait]
pub trait DashboardRepo: Send + Sync {
    async fn workout_count_since(&self, user_id: i64, since: Date) -> Result<i64, RepoError>;

    async fn step_total_since(&self, user_id: i64, since: Date) -> Result<i64, RepoError>;

    /// Distinct days carrying a workout or a step log on or after `since`.
    async fn active_days_since(&self, user_id: i64, since: Date) -> Result<i64, RepoError>;

    async fn monthly_workout_counts(
        &self,
        user_id: i64,
        since: Date,
    ) -> Result<Vec<MonthWorkoutCount>, RepoError>;
}
