//! User, signup, and profile handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::users::{NewAccount, ProfileUpdate};
use crate::infra::http::error::ApiError;
use crate::infra::http::models::{
    SignupRequest, SignupResponse, UpdateProfileRequest, UpdateProfileResponse,
};
use crate::infra::http::state::ApiState;

pub async fn list_users(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.users.list_users().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<ApiState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.get_user(user_id).await?;
    Ok(Json(user))
}

pub async fn signup(
    State(state): State<ApiState>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(name), Some(email), Some(password)) =
        (payload.name, payload.email, payload.password)
    else {
        return Err(ApiError::bad_request("Missing required fields"));
    };

    let account = NewAccount {
        name,
        email,
        password,
        role: payload.role,
        location: payload.location,
        weight_kg: payload.weight_kg,
        height_cm: payload.height_cm,
        goal: payload.goal,
    };

    let user = state.users.signup(account).await?;
    let body = SignupResponse {
        message: "Signup successful",
        user,
    };
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn get_profile(
    State(state): State<ApiState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.users.profile(user_id).await?;
    Ok(Json(profile))
}

/// Scalar fields absent from the payload keep their current values; the
/// fitness fields are taken as submitted so the bmi always reflects the
/// latest measurements.
pub async fn update_profile(
    State(state): State<ApiState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let current = state.users.profile(user_id).await?;

    let update = ProfileUpdate {
        user_id,
        name: payload.name.unwrap_or(current.name),
        email: payload.email.unwrap_or(current.email),
        role: payload.role.unwrap_or(current.role),
        location: payload.location.unwrap_or(current.location),
        weight_kg: payload.weight_kg,
        height_cm: payload.height_cm,
        goal: payload.goal,
    };

    state.users.update_profile(update).await?;
    Ok(Json(UpdateProfileResponse {
        success: true,
        message: "Profile updated successfully!",
    }))
}
