//! Per-user settings with cached reads and invalidating upserts.

use std::sync::Arc;

use crate::application::error::AppError;
use crate::application::repos::{RepoError, SettingsRepo, UpsertSettingsParams};
use crate::cache::{CacheKey, CacheLayer};
use crate::domain::entities::SettingsRecord;

pub struct SettingsService {
    settings: Arc<dyn SettingsRepo>,
    cache: Arc<CacheLayer>,
}

impl SettingsService {
    pub fn new(settings: Arc<dyn SettingsRepo>, cache: Arc<CacheLayer>) -> Self {
        Self { settings, cache }
    }

    /// Cached settings for one user.
    ///
    /// Users who never saved settings get the well-known default record,
    /// cached under the same TTL as a persisted row so repeated misses do
    /// not thrash the store. The default is synthesized, never written.
    pub async fn load(&self, user_id: i64) -> Result<SettingsRecord, AppError> {
        let record = self
            .cache
            .read_through(&CacheKey::SettingsByUser(user_id), || async move {
                let stored = self.settings.find_for_user(user_id).await?;
                Ok::<_, RepoError>(stored.unwrap_or_else(|| SettingsRecord::default_for(user_id)))
            })
            .await?;
        Ok(record)
    }

    /// Upsert the settings row, then drop the cache entry so the next read
    /// repopulates from the store.
    pub async fn update(&self, params: UpsertSettingsParams) -> Result<SettingsRecord, AppError> {
        let user_id = params.user_id;
        let stored = self.settings.upsert(params).await?;
        self.cache
            .invalidate(&[CacheKey::SettingsByUser(user_id)])
            .await;
        Ok(stored)
    }
}
