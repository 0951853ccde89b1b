use async_trait::async_trait;
use time::OffsetDateTime;

use crate::application::repos::{
    RepoError, SignupParams, UpdateProfileParams, UsersRepo,
};
use crate::domain::entities::{ProfileRecord, UserRecord};

use super::{map_sqlx_error, PostgresRepositories};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    role: String,
    location: String,
    avatar_url: Option<String>,
    joined_at: OffsetDateTime,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            location: row.location,
            avatar_url: row.avatar_url,
            joined_at: row.joined_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    name: String,
    email: String,
    role: String,
    location: String,
    avatar_url: Option<String>,
    joined_at: OffsetDateTime,
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    goal: Option<String>,
    bmi: Option<f64>,
}

impl From<ProfileRow> for ProfileRecord {
    fn from(row: ProfileRow) -> Self {
        Self {
            name: row.name,
            email: row.email,
            role: row.role,
            location: row.location,
            avatar_url: row.avatar_url,
            joined_at: row.joined_at,
            weight_kg: row.weight_kg,
            height_cm: row.height_cm,
            goal: row.goal,
            bmi: row.bmi,
        }
    }
}

const USER_COLUMNS: &str = "id, name, email, role, location, avatar_url, joined_at";

#[async_trait]
impl UsersRepo for PostgresRepositories {
    async fn list_all(&self) -> Result<Vec<UserRecord>, RepoError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id ASC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(UserRecord::from).collect())
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UserRecord::from))
    }

    async fn create_account(&self, params: SignupParams) -> Result<UserRecord, RepoError> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx_error)?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (name, email, credential_hash, role, location, joined_at) \
             VALUES ($1, $2, $3, $4, $5, NOW()) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&params.name)
        .bind(&params.email)
        .bind(&params.credential_hash)
        .bind(&params.role)
        .bind(&params.location)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        sqlx::query(
            "INSERT INTO fitness_profile (user_id, weight_kg, height_cm, goal, bmi, updated_at) \
             VALUES ($1, $2, $3, $4, $5, NOW())",
        )
        .bind(row.id)
        .bind(params.weight_kg)
        .bind(params.height_cm)
        .bind(params.goal.as_deref())
        .bind(params.bmi)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(UserRecord::from(row))
    }

    async fn load_profile(&self, user_id: i64) -> Result<Option<ProfileRecord>, RepoError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT u.name, u.email, u.role, u.location, u.avatar_url, u.joined_at, \
                    f.weight_kg, f.height_cm, f.goal, f.bmi \
             FROM users u \
             LEFT JOIN fitness_profile f ON u.id = f.user_id \
             WHERE u.id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(ProfileRecord::from))
    }

    async fn update_profile(&self, params: UpdateProfileParams) -> Result<(), RepoError> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx_error)?;

        let updated = sqlx::query(
            "UPDATE users \
             SET name = $1, email = $2, role = $3, location = $4 \
             WHERE id = $5",
        )
        .bind(&params.name)
        .bind(&params.email)
        .bind(&params.role)
        .bind(&params.location)
        .bind(params.user_id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if updated.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        sqlx::query(
            "INSERT INTO fitness_profile (user_id, weight_kg, height_cm, goal, bmi, updated_at) \
             VALUES ($1, $2, $3, $4, $5, NOW()) \
             ON CONFLICT (user_id) \
             DO UPDATE SET weight_kg = EXCLUDED.weight_kg, \
                           height_cm = EXCLUDED.height_cm, \
                           goal = EXCLUDED.goal, \
                           bmi = EXCLUDED.bmi, \
                           updated_at = NOW()",
        )
        .bind(params.user_id)
        .bind(params.weight_kg)
        .bind(params.height_cm)
        .bind(params.goal.as_deref())
        .bind(params.bmi)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)
    }
}
