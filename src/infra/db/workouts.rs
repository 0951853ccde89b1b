use async_trait::async_trait;
use time::Date;

use crate::application::repos::{
    CreateWorkoutParams, NewExercise, RepoError, UpdateWorkoutParams, WorkoutsRepo,
};
use crate::domain::entities::{WorkoutDetailRow, WorkoutRecord};
use crate::domain::types::WorkoutType;

use super::{map_sqlx_error, PostgresRepositories};

#[derive(sqlx::FromRow)]
struct WorkoutRow {
    id: i64,
    user_id: i64,
    workout_type: WorkoutType,
    name: String,
    date: Date,
    duration_min: Option<i32>,
    notes: Option<String>,
}

impl From<WorkoutRow> for WorkoutRecord {
    fn from(row: WorkoutRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            workout_type: row.workout_type,
            name: row.name,
            date: row.date,
            duration_min: row.duration_min,
            notes: row.notes,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DetailRow {
    id: i64,
    user_id: i64,
    workout_type: WorkoutType,
    name: String,
    date: Date,
    workout_duration_min: Option<i32>,
    notes: Option<String>,
    exercise_name: Option<String>,
    sets: Option<i32>,
    reps: Option<i32>,
    weight_kg: Option<f64>,
    exercise_duration_min: Option<i32>,
}

impl From<DetailRow> for WorkoutDetailRow {
    fn from(row: DetailRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            workout_type: row.workout_type,
            name: row.name,
            date: row.date,
            workout_duration_min: row.workout_duration_min,
            notes: row.notes,
            exercise_name: row.exercise_name,
            sets: row.sets,
            reps: row.reps,
            weight_kg: row.weight_kg,
            exercise_duration_min: row.exercise_duration_min,
        }
    }
}

const INSERT_EXERCISE: &str = "\
    INSERT INTO workout_exercises \
        (workout_id, exercise_name, sets, reps, weight_kg, duration_min) \
    VALUES ($1, $2, $3, $4, $5, $6)";

async fn insert_exercises(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    workout_id: i64,
    exercises: &[NewExercise],
) -> Result<(), RepoError> {
    for exercise in exercises {
        sqlx::query(INSERT_EXERCISE)
            .bind(workout_id)
            .bind(exercise.exercise_name.as_deref())
            .bind(exercise.sets)
            .bind(exercise.reps)
            .bind(exercise.weight_kg)
            .bind(exercise.duration_min)
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx_error)?;
    }
    Ok(())
}

#[async_trait]
impl WorkoutsRepo for PostgresRepositories {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<WorkoutRecord>, RepoError> {
        let rows = sqlx::query_as::<_, WorkoutRow>(
            "SELECT id, user_id, workout_type, name, date, duration_min, notes \
             FROM workouts \
             WHERE user_id = $1 \
             ORDER BY date DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(WorkoutRecord::from).collect())
    }

    async fn detail_rows(&self, workout_id: i64) -> Result<Vec<WorkoutDetailRow>, RepoError> {
        let rows = sqlx::query_as::<_, DetailRow>(
            "SELECT w.id, \
                    w.user_id, \
                    w.workout_type, \
                    w.name, \
                    w.date, \
                    w.duration_min AS workout_duration_min, \
                    w.notes, \
                    we.exercise_name, \
                    we.sets, \
                    we.reps, \
                    we.weight_kg, \
                    we.duration_min AS exercise_duration_min \
             FROM workouts w \
             LEFT JOIN workout_exercises we ON w.id = we.workout_id \
             WHERE w.id = $1 \
             ORDER BY we.id",
        )
        .bind(workout_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(WorkoutDetailRow::from).collect())
    }

    async fn owner_of(&self, workout_id: i64) -> Result<Option<i64>, RepoError> {
        sqlx::query_scalar::<_, i64>("SELECT user_id FROM workouts WHERE id = $1")
            .bind(workout_id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn create(&self, params: CreateWorkoutParams) -> Result<WorkoutRecord, RepoError> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx_error)?;

        let row = sqlx::query_as::<_, WorkoutRow>(
            "INSERT INTO workouts (user_id, workout_type, name, date, duration_min, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, user_id, workout_type, name, date, duration_min, notes",
        )
        .bind(params.user_id)
        .bind(params.workout_type)
        .bind(&params.name)
        .bind(params.date)
        .bind(params.duration_min)
        .bind(params.notes.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        insert_exercises(&mut tx, row.id, &params.exercises).await?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(WorkoutRecord::from(row))
    }

    async fn update(&self, params: UpdateWorkoutParams) -> Result<(), RepoError> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx_error)?;

        let updated = sqlx::query(
            "UPDATE workouts \
             SET workout_type = $1, name = $2, date = $3, duration_min = $4, notes = $5 \
             WHERE id = $6",
        )
        .bind(params.workout_type)
        .bind(&params.name)
        .bind(params.date)
        .bind(params.duration_min)
        .bind(params.notes.as_deref())
        .bind(params.id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if updated.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        // Update-by-replace: drop the whole child collection and reinsert
        // the submitted one instead of diffing per row.
        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1")
            .bind(params.id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        insert_exercises(&mut tx, params.id, &params.exercises).await?;

        tx.commit().await.map_err(map_sqlx_error)
    }

    async fn delete(&self, workout_id: i64) -> Result<(), RepoError> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx_error)?;

        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1")
            .bind(workout_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let deleted = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(workout_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        if deleted.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        tx.commit().await.map_err(map_sqlx_error)
    }
}
