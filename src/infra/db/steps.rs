use async_trait::async_trait;
use time::{Date, OffsetDateTime};

use crate::application::repos::{RepoError, StepsRepo, UpsertStepsParams};
use crate::domain::entities::StepsLogRecord;

use super::{map_sqlx_error, PostgresRepositories};

#[derive(sqlx::FromRow)]
struct StepsLogRow {
    id: i64,
    user_id: i64,
    step_date: Date,
    steps_count: i32,
    distance_km: Option<f64>,
    calories_burned: Option<i32>,
    created_at: OffsetDateTime,
}

impl From<StepsLogRow> for StepsLogRecord {
    fn from(row: StepsLogRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            step_date: row.step_date,
            steps_count: row.steps_count,
            distance_km: row.distance_km,
            calories_burned: row.calories_burned,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl StepsRepo for PostgresRepositories {
    async fn upsert(&self, params: UpsertStepsParams) -> Result<StepsLogRecord, RepoError> {
        // Single statement, atomic under the (user_id, step_date) unique
        // constraint; no explicit transaction needed.
        let row = sqlx::query_as::<_, StepsLogRow>(
            "INSERT INTO steps_logs \
                 (user_id, step_date, steps_count, distance_km, calories_burned) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id, step_date) \
             DO UPDATE SET steps_count = EXCLUDED.steps_count, \
                           distance_km = EXCLUDED.distance_km, \
                           calories_burned = EXCLUDED.calories_burned, \
                           created_at = NOW() \
             RETURNING id, user_id, step_date, steps_count, distance_km, \
                       calories_burned, created_at",
        )
        .bind(params.user_id)
        .bind(params.step_date)
        .bind(params.steps_count)
        .bind(params.distance_km)
        .bind(params.calories_burned)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(StepsLogRecord::from(row))
    }
}
