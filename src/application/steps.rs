//! Daily step logging.

use std::sync::Arc;

use crate::application::error::AppError;
use crate::application::repos::{StepsRepo, UpsertStepsParams};
use crate::domain::entities::StepsLogRecord;

/// Step logs are written through an idempotent upsert and are read only by
/// the dashboard aggregates, so no cache entry ever covers them.
pub struct StepsService {
    steps: Arc<dyn StepsRepo>,
}

impl StepsService {
    pub fn new(steps: Arc<dyn StepsRepo>) -> Self {
        Self { steps }
    }

    /// Record (or overwrite) the log for one user and day. Posting twice
    /// for the same day leaves a single row holding the later payload.
    pub async fn log_steps(&self, params: UpsertStepsParams) -> Result<StepsLogRecord, AppError> {
        let record = self.steps.upsert(params).await?;
        Ok(record)
    }
}
