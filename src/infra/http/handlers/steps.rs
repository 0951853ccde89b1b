//! Step log handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::repos::UpsertStepsParams;
use crate::infra::http::error::ApiError;
use crate::infra::http::models::{LogStepsRequest, LogStepsResponse};
use crate::infra::http::state::ApiState;

pub async fn log_steps(
    State(state): State<ApiState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<LogStepsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(step_date), Some(steps_count)) = (payload.step_date, payload.steps_count) else {
        return Err(ApiError::bad_request("Missing required fields"));
    };

    let record = state
        .steps
        .log_steps(UpsertStepsParams {
            user_id,
            step_date,
            steps_count,
            distance_km: payload.distance_km,
            calories_burned: payload.calories_burned,
        })
        .await?;

    Ok(Json(LogStepsResponse {
        message: "Steps added successfully",
        new_steps: record,
    }))
}
