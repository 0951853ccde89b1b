use async_trait::async_trait;
use sqlx::types::Json;

use crate::application::repos::{RepoError, SettingsRepo, UpsertSettingsParams};
use crate::domain::entities::{NotificationFlags, SettingsRecord};
use crate::domain::types::Theme;

use super::{map_sqlx_error, PostgresRepositories};

#[derive(sqlx::FromRow)]
struct SettingsRow {
    user_id: i64,
    theme: Theme,
    language: String,
    notifications: Json<NotificationFlags>,
}

impl From<SettingsRow> for SettingsRecord {
    fn from(row: SettingsRow) -> Self {
        Self {
            user_id: row.user_id,
            theme: row.theme,
            language: row.language,
            notifications: row.notifications.0,
        }
    }
}

#[async_trait]
impl SettingsRepo for PostgresRepositories {
    async fn find_for_user(&self, user_id: i64) -> Result<Option<SettingsRecord>, RepoError> {
        let row = sqlx::query_as::<_, SettingsRow>(
            "SELECT user_id, theme, language, notifications \
             FROM settings \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(SettingsRecord::from))
    }

    async fn upsert(&self, params: UpsertSettingsParams) -> Result<SettingsRecord, RepoError> {
        let row = sqlx::query_as::<_, SettingsRow>(
            "INSERT INTO settings (user_id, theme, language, notifications) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id) \
             DO UPDATE SET theme = EXCLUDED.theme, \
                           language = EXCLUDED.language, \
                           notifications = EXCLUDED.notifications \
             RETURNING user_id, theme, language, notifications",
        )
        .bind(params.user_id)
        .bind(params.theme)
        .bind(&params.language)
        .bind(Json(params.notifications))
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(SettingsRecord::from(row))
    }
}
