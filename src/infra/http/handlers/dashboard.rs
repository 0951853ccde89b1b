//! Dashboard handler.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::infra::http::error::ApiError;
use crate::infra::http::state::ApiState;

pub async fn summary(
    State(state): State<ApiState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.dashboard.summary(user_id).await?;
    Ok(Json(summary))
}
