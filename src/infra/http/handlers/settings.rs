//! Settings handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::repos::UpsertSettingsParams;
use crate::infra::http::error::ApiError;
use crate::infra::http::models::{UpdateSettingsRequest, UpdateSettingsResponse};
use crate::infra::http::state::ApiState;

pub async fn get_settings(
    State(state): State<ApiState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = state.settings.load(user_id).await?;
    Ok(Json(settings))
}

pub async fn update_settings(
    State(state): State<ApiState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(theme), Some(language)) = (payload.theme, payload.language) else {
        return Err(ApiError::bad_request("Missing required fields"));
    };

    let stored = state
        .settings
        .update(UpsertSettingsParams {
            user_id,
            theme,
            language,
            notifications: payload.notifications.unwrap_or_default(),
        })
        .await?;

    Ok(Json(UpdateSettingsResponse {
        message: "Settings saved",
        settings: stored,
    }))
}
