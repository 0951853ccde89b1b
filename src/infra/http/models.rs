//! Request and response bodies for the JSON API.
//!
//! Requests keep every field optional: required-field checks happen in the
//! handlers so a missing field yields a descriptive 400 instead of a serde
//! type error. Enum-typed fields are the exception; an unknown workout
//! type or theme is rejected at deserialization.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::application::repos::NewExercise;
use crate::domain::entities::{
    NotificationFlags, SettingsRecord, StepsLogRecord, UserRecord, WorkoutRecord,
};
use crate::domain::types::{Theme, WorkoutType};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ============================================================================
// Workouts
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExercisePayload {
    pub exercise_name: Option<String>,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
    pub duration_min: Option<i32>,
}

impl From<ExercisePayload> for NewExercise {
    fn from(payload: ExercisePayload) -> Self {
        Self {
            exercise_name: payload.exercise_name,
            sets: payload.sets,
            reps: payload.reps,
            weight_kg: payload.weight_kg,
            duration_min: payload.duration_min,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    pub user_id: Option<i64>,
    #[serde(rename = "type")]
    pub workout_type: Option<WorkoutType>,
    pub name: Option<String>,
    #[serde(default, with = "crate::domain::dates::option")]
    pub date: Option<Date>,
    pub duration_min: Option<i32>,
    pub notes: Option<String>,
    #[serde(default)]
    pub exercises: Vec<ExercisePayload>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateWorkoutRequest {
    #[serde(rename = "type")]
    pub workout_type: Option<WorkoutType>,
    pub name: Option<String>,
    #[serde(default, with = "crate::domain::dates::option")]
    pub date: Option<Date>,
    pub duration_min: Option<i32>,
    pub notes: Option<String>,
    #[serde(default)]
    pub exercises: Vec<ExercisePayload>,
}

#[derive(Debug, Serialize)]
pub struct CreatedWorkout {
    #[serde(flatten)]
    pub workout: WorkoutRecord,
    pub exercises: Vec<ExercisePayload>,
}

#[derive(Debug, Serialize)]
pub struct CreateWorkoutResponse {
    pub message: &'static str,
    pub workout: CreatedWorkout,
}

// ============================================================================
// Steps
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LogStepsRequest {
    #[serde(default, with = "crate::domain::dates::option")]
    pub step_date: Option<Date>,
    pub steps_count: Option<i32>,
    pub distance_km: Option<f64>,
    pub calories_burned: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct LogStepsResponse {
    pub message: &'static str,
    #[serde(rename = "newSteps")]
    pub new_steps: StepsLogRecord,
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub theme: Option<Theme>,
    pub language: Option<String>,
    pub notifications: Option<NotificationFlags>,
}

#[derive(Debug, Serialize)]
pub struct UpdateSettingsResponse {
    pub message: &'static str,
    pub settings: SettingsRecord,
}

// ============================================================================
// Users and profiles
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub goal: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user: UserRecord,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub goal: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub success: bool,
    pub message: &'static str,
}
