//! Accounts, profiles, and the cached all-users listing.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::application::error::AppError;
use crate::application::repos::{
    RepoError, SignupParams, UpdateProfileParams, UsersRepo,
};
use crate::cache::{CacheKey, CacheLayer};
use crate::domain::entities::{bmi, ProfileRecord, UserRecord};

const DEFAULT_ROLE: &str = "Beginner";
const DEFAULT_LOCATION: &str = "Unknown";

/// Signup payload after boundary validation.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub location: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub goal: Option<String>,
}

/// Profile edit payload. The bmi is always re-derived here, never taken
/// from the client.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub location: String,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub goal: Option<String>,
}

pub struct UserService {
    users: Arc<dyn UsersRepo>,
    cache: Arc<CacheLayer>,
}

impl UserService {
    pub fn new(users: Arc<dyn UsersRepo>, cache: Arc<CacheLayer>) -> Self {
        Self { users, cache }
    }

    /// Cached listing of every account.
    ///
    /// No write path clears `users:all`; new signups become visible once
    /// the entry expires. The staleness window is bounded by the TTL.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
        let rows = self
            .cache
            .read_through(&CacheKey::AllUsers, || self.users.list_all())
            .await?;
        Ok(rows)
    }

    pub async fn get_user(&self, user_id: i64) -> Result<UserRecord, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::not_found("user"))
    }

    /// Create the account and its fitness profile in one transaction.
    ///
    /// The credential is hashed here; token issuance for the fresh session
    /// is the caller's concern.
    pub async fn signup(&self, account: NewAccount) -> Result<UserRecord, AppError> {
        let derived_bmi = bmi(account.weight_kg, account.height_cm);
        let params = SignupParams {
            name: account.name,
            email: account.email,
            credential_hash: hash_credential(&account.password),
            role: account.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            location: account
                .location
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            weight_kg: account.weight_kg,
            height_cm: account.height_cm,
            goal: account.goal,
            bmi: derived_bmi,
        };

        match self.users.create_account(params).await {
            Ok(record) => Ok(record),
            Err(RepoError::Duplicate { .. }) => {
                Err(AppError::validation("Email already registered"))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn profile(&self, user_id: i64) -> Result<ProfileRecord, AppError> {
        self.users
            .load_profile(user_id)
            .await?
            .ok_or(AppError::not_found("user"))
    }

    /// Update user scalars and upsert the fitness profile atomically.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<(), AppError> {
        let derived_bmi = bmi(update.weight_kg, update.height_cm);
        let params = UpdateProfileParams {
            user_id: update.user_id,
            name: update.name,
            email: update.email,
            role: update.role,
            location: update.location,
            weight_kg: update.weight_kg,
            height_cm: update.height_cm,
            goal: update.goal,
            bmi: derived_bmi,
        };

        match self.users.update_profile(params).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(AppError::not_found("user")),
            Err(err) => Err(err.into()),
        }
    }
}

fn hash_credential(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}
