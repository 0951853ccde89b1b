//! Persisted record types.
//!
//! These mirror the database rows one-to-one. Cache entries hold full JSON
//! serializations of these records, so every cacheable type derives both
//! `Serialize` and `Deserialize`.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::domain::types::{Theme, WorkoutType};

/// Account row. The credential hash never leaves the persistence layer and
/// is deliberately absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub location: String,
    pub avatar_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

/// Fitness profile row, 1:1 with a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessProfileRecord {
    pub user_id: i64,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub goal: Option<String>,
    pub bmi: Option<f64>,
}

/// Flat user ⋈ fitness_profile join served by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    pub email: String,
    pub role: String,
    pub location: String,
    pub avatar_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub goal: Option<String>,
    pub bmi: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub name: String,
    #[serde(with = "crate::domain::dates")]
    pub date: Date,
    pub duration_min: Option<i32>,
    pub notes: Option<String>,
}

/// Child exercise row, cascade-deleted with its workout. Fields not
/// meaningful to the workout type stay null and are never validated
/// against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_name: Option<String>,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
    pub duration_min: Option<i32>,
}

/// One row of the workout-detail LEFT JOIN: workout columns repeated per
/// exercise. A workout without exercises yields a single row whose
/// exercise columns are all null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDetailRow {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub name: String,
    #[serde(with = "crate::domain::dates")]
    pub date: Date,
    pub workout_duration_min: Option<i32>,
    pub notes: Option<String>,
    pub exercise_name: Option<String>,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
    pub exercise_duration_min: Option<i32>,
}

/// Daily step log, unique per (user_id, step_date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepsLogRecord {
    pub id: i64,
    pub user_id: i64,
    #[serde(with = "crate::domain::dates")]
    pub step_date: Date,
    pub steps_count: i32,
    pub distance_km: Option<f64>,
    pub calories_burned: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Notification toggles stored as a JSON document on the settings row.
///
/// `Default` maps the empty document `{}` to all-off; the synthesized
/// settings record for users without a row opts into email alerts instead
/// (see [`SettingsRecord::default_for`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationFlags {
    pub email_alerts: bool,
    pub sms_notifications: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub user_id: i64,
    pub theme: Theme,
    pub language: String,
    pub notifications: NotificationFlags,
}

impl SettingsRecord {
    /// The well-known record served (and cached) for users who never saved
    /// settings. Never persisted.
    pub fn default_for(user_id: i64) -> Self {
        Self {
            user_id,
            theme: Theme::Light,
            language: "English".to_string(),
            notifications: NotificationFlags {
                email_alerts: true,
                sms_notifications: false,
            },
        }
    }
}

/// Body-mass index from weight and height, rounded to one decimal place.
///
/// Computed server-side on every signup and profile write; client-supplied
/// values are ignored. Returns `None` unless both inputs are present and
/// the height is positive.
pub fn bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    match (weight_kg, height_cm) {
        (Some(weight), Some(height)) if height > 0.0 => {
            let height_m = height / 100.0;
            Some((weight / (height_m * height_m) * 10.0).round() / 10.0)
        }
        _ => None,
    }
}
