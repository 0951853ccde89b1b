//! Workout handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::repos::{CreateWorkoutParams, UpdateWorkoutParams};
use crate::infra::http::error::ApiError;
use crate::infra::http::models::{
    CreateWorkoutRequest, CreateWorkoutResponse, CreatedWorkout, MessageResponse,
    UpdateWorkoutRequest,
};
use crate::infra::http::state::ApiState;

const MISSING_FIELDS: &str = "Missing required fields";

pub async fn list_workouts(
    State(state): State<ApiState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let workouts = state.workouts.list_for_user(user_id).await?;
    Ok(Json(workouts))
}

pub async fn workout_details(
    State(state): State<ApiState>,
    Path(workout_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state.workouts.details(workout_id).await?;
    Ok(Json(rows))
}

pub async fn create_workout(
    State(state): State<ApiState>,
    Json(payload): Json<CreateWorkoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(user_id), Some(workout_type), Some(name), Some(date)) = (
        payload.user_id,
        payload.workout_type,
        payload.name,
        payload.date,
    ) else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };

    let exercises = payload.exercises.clone();
    let params = CreateWorkoutParams {
        user_id,
        workout_type,
        name,
        date,
        duration_min: payload.duration_min,
        notes: payload.notes,
        exercises: payload.exercises.into_iter().map(Into::into).collect(),
    };

    let record = state.workouts.create(params).await?;
    let body = CreateWorkoutResponse {
        message: "Workout created",
        workout: CreatedWorkout {
            workout: record,
            exercises,
        },
    };
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn update_workout(
    State(state): State<ApiState>,
    Path(workout_id): Path<i64>,
    Json(payload): Json<UpdateWorkoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(workout_type), Some(name), Some(date)) =
        (payload.workout_type, payload.name, payload.date)
    else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };

    let params = UpdateWorkoutParams {
        id: workout_id,
        workout_type,
        name,
        date,
        duration_min: payload.duration_min,
        notes: payload.notes,
        exercises: payload.exercises.into_iter().map(Into::into).collect(),
    };

    state.workouts.update(params).await?;
    Ok(Json(MessageResponse {
        message: "Workout updated",
    }))
}

pub async fn delete_workout(
    State(state): State<ApiState>,
    Path(workout_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.workouts.delete(workout_id).await?;
    Ok(Json(MessageResponse {
        message: "Workout deleted",
    }))
}
