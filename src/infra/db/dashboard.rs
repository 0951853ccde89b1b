use async_trait::async_trait;
use time::Date;

use crate::application::repos::{DashboardRepo, MonthWorkoutCount, RepoError};

use super::{map_sqlx_error, PostgresRepositories};

#[derive(sqlx::FromRow)]
struct MonthRow {
    month: i32,
    workouts: i64,
}

#[async_trait]
impl DashboardRepo for PostgresRepositories {
    async fn workout_count_since(&self, user_id: i64, since: Date) -> Result<i64, RepoError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM workouts WHERE user_id = $1 AND date >= $2",
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn step_total_since(&self, user_id: i64, since: Date) -> Result<i64, RepoError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(steps_count), 0)::BIGINT \
             FROM steps_logs \
             WHERE user_id = $1 AND step_date >= $2",
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn active_days_since(&self, user_id: i64, since: Date) -> Result<i64, RepoError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT day) \
             FROM ( \
                 SELECT date AS day \
                 FROM workouts \
                 WHERE user_id = $1 AND date >= $2 \
                 UNION \
                 SELECT step_date AS day \
                 FROM steps_logs \
                 WHERE user_id = $1 AND step_date >= $2 \
             ) combined",
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn monthly_workout_counts(
        &self,
        user_id: i64,
        since: Date,
    ) -> Result<Vec<MonthWorkoutCount>, RepoError> {
        let rows = sqlx::query_as::<_, MonthRow>(
            "SELECT EXTRACT(MONTH FROM date)::INT AS month, COUNT(*) AS workouts \
             FROM workouts \
             WHERE user_id = $1 AND date >= $2 \
             GROUP BY 1 \
             ORDER BY 1",
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|row| MonthWorkoutCount {
                month: row.month,
                workouts: row.workouts,
            })
            .collect())
    }
}
