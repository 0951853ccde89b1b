//! Shared domain enumerations aligned with persisted database enums.
//!
//! Both enums are closed: unknown values are rejected at the
//! deserialization boundary instead of being stored as free-form strings.

use serde::{Deserialize, Serialize};

/// Workout discipline (mirrors Postgres enum `workout_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "workout_type")]
pub enum WorkoutType {
    Strength,
    Cardio,
    Yoga,
    Flexibility,
}

impl WorkoutType {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutType::Strength => "Strength",
            WorkoutType::Cardio => "Cardio",
            WorkoutType::Yoga => "Yoga",
            WorkoutType::Flexibility => "Flexibility",
        }
    }
}

/// UI theme preference (mirrors Postgres enum `theme`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "theme")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }
}
