//! Shared fixtures: in-memory repository fakes and a router harness.
//!
//! The fakes keep the repository contracts honest (all-or-nothing writes,
//! upsert-by-key, left-join detail rows) so the cache orchestration and
//! handlers can be exercised without Postgres.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use time::{Date, OffsetDateTime};
use tower::ServiceExt;

use stridelog::application::dashboard::DashboardService;
use stridelog::application::repos::{
    CreateWorkoutParams, DashboardRepo, MonthWorkoutCount, RepoError, SettingsRepo, SignupParams,
    StepsRepo, UpdateProfileParams, UpdateWorkoutParams, UpsertSettingsParams, UpsertStepsParams,
    UsersRepo, WorkoutsRepo,
};
use stridelog::application::settings::SettingsService;
use stridelog::application::steps::StepsService;
use stridelog::application::users::UserService;
use stridelog::application::workouts::WorkoutService;
use stridelog::cache::{CacheConfig, CacheError, CacheLayer, CacheStore, MemoryStore};
use stridelog::domain::entities::{
    ExerciseRecord, FitnessProfileRecord, ProfileRecord, SettingsRecord, StepsLogRecord,
    UserRecord, WorkoutDetailRow, WorkoutRecord,
};
use stridelog::domain::types::WorkoutType;
use stridelog::infra::http::{build_router, ApiState};

struct StoredUser {
    record: UserRecord,
    profile: FitnessProfileRecord,
}

#[derive(Default)]
struct FakeState {
    users: Vec<StoredUser>,
    workouts: Vec<WorkoutRecord>,
    exercises: Vec<ExerciseRecord>,
    steps: Vec<StepsLogRecord>,
    settings: Vec<SettingsRecord>,
    next_user_id: i64,
    next_workout_id: i64,
    next_exercise_id: i64,
    next_steps_id: i64,
}

/// In-memory stand-in for the Postgres repositories.
pub struct FakeRepos {
    state: Mutex<FakeState>,
    /// When set, workout writes fail before touching any state, modeling a
    /// rolled-back transaction.
    fail_workout_writes: AtomicBool,
}

impl FakeRepos {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState::default()),
            fail_workout_writes: AtomicBool::new(false),
        })
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake state lock")
    }

    pub fn fail_workout_writes(&self, fail: bool) {
        self.fail_workout_writes.store(fail, Ordering::SeqCst);
    }

    pub fn seed_user(&self, name: &str, email: &str) -> i64 {
        let mut state = self.state();
        state.next_user_id += 1;
        let id = state.next_user_id;
        state.users.push(StoredUser {
            record: UserRecord {
                id,
                name: name.to_string(),
                email: email.to_string(),
                role: "Beginner".to_string(),
                location: "Unknown".to_string(),
                avatar_url: None,
                joined_at: OffsetDateTime::now_utc(),
            },
            profile: FitnessProfileRecord {
                user_id: id,
                weight_kg: None,
                height_cm: None,
                goal: None,
                bmi: None,
            },
        });
        id
    }

    pub fn seed_workout(&self, user_id: i64, workout_type: WorkoutType, date: Date) -> i64 {
        let mut state = self.state();
        state.next_workout_id += 1;
        let id = state.next_workout_id;
        state.workouts.push(WorkoutRecord {
            id,
            user_id,
            workout_type,
            name: format!("workout-{id}"),
            date,
            duration_min: None,
            notes: None,
        });
        id
    }

    pub fn seed_steps(&self, user_id: i64, date: Date, steps_count: i32) {
        let mut state = self.state();
        state.next_steps_id += 1;
        let id = state.next_steps_id;
        state.steps.push(StepsLogRecord {
            id,
            user_id,
            step_date: date,
            steps_count,
            distance_km: None,
            calories_burned: None,
            created_at: OffsetDateTime::now_utc(),
        });
    }

    pub fn workout_count(&self) -> usize {
        self.state().workouts.len()
    }

    pub fn workouts_for(&self, user_id: i64) -> Vec<WorkoutRecord> {
        self.state()
            .workouts
            .iter()
            .filter(|workout| workout.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn exercises_for(&self, workout_id: i64) -> Vec<ExerciseRecord> {
        self.state()
            .exercises
            .iter()
            .filter(|exercise| exercise.workout_id == workout_id)
            .cloned()
            .collect()
    }

    pub fn steps_rows(&self) -> Vec<StepsLogRecord> {
        self.state().steps.clone()
    }
}

#[async_trait]
impl UsersRepo for FakeRepos {
    async fn list_all(&self) -> Result<Vec<UserRecord>, RepoError> {
        Ok(self
            .state()
            .users
            .iter()
            .map(|user| user.record.clone())
            .collect())
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, RepoError> {
        Ok(self
            .state()
            .users
            .iter()
            .find(|user| user.record.id == user_id)
            .map(|user| user.record.clone()))
    }

    async fn create_account(&self, params: SignupParams) -> Result<UserRecord, RepoError> {
        let mut state = self.state();
        if state
            .users
            .iter()
            .any(|user| user.record.email == params.email)
        {
            return Err(RepoError::Duplicate {
                constraint: "users_email_key".to_string(),
            });
        }

        state.next_user_id += 1;
        let id = state.next_user_id;
        let record = UserRecord {
            id,
            name: params.name,
            email: params.email,
            role: params.role,
            location: params.location,
            avatar_url: None,
            joined_at: OffsetDateTime::now_utc(),
        };
        state.users.push(StoredUser {
            record: record.clone(),
            profile: FitnessProfileRecord {
                user_id: id,
                weight_kg: params.weight_kg,
                height_cm: params.height_cm,
                goal: params.goal,
                bmi: params.bmi,
            },
        });
        Ok(record)
    }

    async fn load_profile(&self, user_id: i64) -> Result<Option<ProfileRecord>, RepoError> {
        Ok(self
            .state()
            .users
            .iter()
            .find(|user| user.record.id == user_id)
            .map(|user| ProfileRecord {
                name: user.record.name.clone(),
                email: user.record.email.clone(),
                role: user.record.role.clone(),
                location: user.record.location.clone(),
                avatar_url: user.record.avatar_url.clone(),
                joined_at: user.record.joined_at,
                weight_kg: user.profile.weight_kg,
                height_cm: user.profile.height_cm,
                goal: user.profile.goal.clone(),
                bmi: user.profile.bmi,
            }))
    }

    async fn update_profile(&self, params: UpdateProfileParams) -> Result<(), RepoError> {
        let mut state = self.state();
        let user = state
            .users
            .iter_mut()
            .find(|user| user.record.id == params.user_id)
            .ok_or(RepoError::NotFound)?;

        user.record.name = params.name;
        user.record.email = params.email;
        user.record.role = params.role;
        user.record.location = params.location;
        user.profile.weight_kg = params.weight_kg;
        user.profile.height_cm = params.height_cm;
        user.profile.goal = params.goal;
        user.profile.bmi = params.bmi;
        Ok(())
    }
}

#[async_trait]
impl WorkoutsRepo for FakeRepos {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<WorkoutRecord>, RepoError> {
        let mut workouts: Vec<WorkoutRecord> = self
            .state()
            .workouts
            .iter()
            .filter(|workout| workout.user_id == user_id)
            .cloned()
            .collect();
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(workouts)
    }

    async fn detail_rows(&self, workout_id: i64) -> Result<Vec<WorkoutDetailRow>, RepoError> {
        let state = self.state();
        let Some(workout) = state
            .workouts
            .iter()
            .find(|workout| workout.id == workout_id)
        else {
            return Ok(Vec::new());
        };

        let exercises: Vec<&ExerciseRecord> = state
            .exercises
            .iter()
            .filter(|exercise| exercise.workout_id == workout_id)
            .collect();

        let base = WorkoutDetailRow {
            id: workout.id,
            user_id: workout.user_id,
            workout_type: workout.workout_type,
            name: workout.name.clone(),
            date: workout.date,
            workout_duration_min: workout.duration_min,
            notes: workout.notes.clone(),
            exercise_name: None,
            sets: None,
            reps: None,
            weight_kg: None,
            exercise_duration_min: None,
        };

        if exercises.is_empty() {
            return Ok(vec![base]);
        }

        Ok(exercises
            .into_iter()
            .map(|exercise| WorkoutDetailRow {
                exercise_name: exercise.exercise_name.clone(),
                sets: exercise.sets,
                reps: exercise.reps,
                weight_kg: exercise.weight_kg,
                exercise_duration_min: exercise.duration_min,
                ..base.clone()
            })
            .collect())
    }

    async fn owner_of(&self, workout_id: i64) -> Result<Option<i64>, RepoError> {
        Ok(self
            .state()
            .workouts
            .iter()
            .find(|workout| workout.id == workout_id)
            .map(|workout| workout.user_id))
    }

    async fn create(&self, params: CreateWorkoutParams) -> Result<WorkoutRecord, RepoError> {
        if self.fail_workout_writes.load(Ordering::SeqCst) {
            return Err(RepoError::from_persistence("simulated write failure"));
        }

        let mut state = self.state();
        state.next_workout_id += 1;
        let id = state.next_workout_id;
        let record = WorkoutRecord {
            id,
            user_id: params.user_id,
            workout_type: params.workout_type,
            name: params.name,
            date: params.date,
            duration_min: params.duration_min,
            notes: params.notes,
        };
        state.workouts.push(record.clone());

        for exercise in params.exercises {
            state.next_exercise_id += 1;
            let exercise_id = state.next_exercise_id;
            state.exercises.push(ExerciseRecord {
                id: exercise_id,
                workout_id: id,
                exercise_name: exercise.exercise_name,
                sets: exercise.sets,
                reps: exercise.reps,
                weight_kg: exercise.weight_kg,
                duration_min: exercise.duration_min,
            });
        }

        Ok(record)
    }

    async fn update(&self, params: UpdateWorkoutParams) -> Result<(), RepoError> {
        if self.fail_workout_writes.load(Ordering::SeqCst) {
            return Err(RepoError::from_persistence("simulated write failure"));
        }

        let mut state = self.state();
        let workout = state
            .workouts
            .iter_mut()
            .find(|workout| workout.id == params.id)
            .ok_or(RepoError::NotFound)?;

        workout.workout_type = params.workout_type;
        workout.name = params.name;
        workout.date = params.date;
        workout.duration_min = params.duration_min;
        workout.notes = params.notes;

        state.exercises.retain(|exercise| exercise.workout_id != params.id);
        for exercise in params.exercises {
            state.next_exercise_id += 1;
            let exercise_id = state.next_exercise_id;
            state.exercises.push(ExerciseRecord {
                id: exercise_id,
                workout_id: params.id,
                exercise_name: exercise.exercise_name,
                sets: exercise.sets,
                reps: exercise.reps,
                weight_kg: exercise.weight_kg,
                duration_min: exercise.duration_min,
            });
        }

        Ok(())
    }

    async fn delete(&self, workout_id: i64) -> Result<(), RepoError> {
        let mut state = self.state();
        let position = state
            .workouts
            .iter()
            .position(|workout| workout.id == workout_id)
            .ok_or(RepoError::NotFound)?;

        state.exercises.retain(|exercise| exercise.workout_id != workout_id);
        state.workouts.remove(position);
        Ok(())
    }
}

#[async_trait]
impl StepsRepo for FakeRepos {
    async fn upsert(&self, params: UpsertStepsParams) -> Result<StepsLogRecord, RepoError> {
        let mut state = self.state();
        if let Some(row) = state
            .steps
            .iter_mut()
            .find(|row| row.user_id == params.user_id && row.step_date == params.step_date)
        {
            row.steps_count = params.steps_count;
            row.distance_km = params.distance_km;
            row.calories_burned = params.calories_burned;
            row.created_at = OffsetDateTime::now_utc();
            return Ok(row.clone());
        }

        state.next_steps_id += 1;
        let id = state.next_steps_id;
        let record = StepsLogRecord {
            id,
            user_id: params.user_id,
            step_date: params.step_date,
            steps_count: params.steps_count,
            distance_km: params.distance_km,
            calories_burned: params.calories_burned,
            created_at: OffsetDateTime::now_utc(),
        };
        state.steps.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl SettingsRepo for FakeRepos {
    async fn find_for_user(&self, user_id: i64) -> Result<Option<SettingsRecord>, RepoError> {
        Ok(self
            .state()
            .settings
            .iter()
            .find(|record| record.user_id == user_id)
            .cloned())
    }

    async fn upsert(&self, params: UpsertSettingsParams) -> Result<SettingsRecord, RepoError> {
        let mut state = self.state();
        let record = SettingsRecord {
            user_id: params.user_id,
            theme: params.theme,
            language: params.language,
            notifications: params.notifications,
        };

        match state
            .settings
            .iter()
            .position(|existing| existing.user_id == params.user_id)
        {
            Some(index) => state.settings[index] = record.clone(),
            None => state.settings.push(record.clone()),
        }
        Ok(record)
    }
}

#[async_trait]
impl DashboardRepo for FakeRepos {
    async fn workout_count_since(&self, user_id: i64, since: Date) -> Result<i64, RepoError> {
        Ok(self
            .state()
            .workouts
            .iter()
            .filter(|workout| workout.user_id == user_id && workout.date >= since)
            .count() as i64)
    }

    async fn step_total_since(&self, user_id: i64, since: Date) -> Result<i64, RepoError> {
        Ok(self
            .state()
            .steps
            .iter()
            .filter(|row| row.user_id == user_id && row.step_date >= since)
            .map(|row| i64::from(row.steps_count))
            .sum())
    }

    async fn active_days_since(&self, user_id: i64, since: Date) -> Result<i64, RepoError> {
        let state = self.state();
        let days: BTreeSet<Date> = state
            .workouts
            .iter()
            .filter(|workout| workout.user_id == user_id && workout.date >= since)
            .map(|workout| workout.date)
            .chain(
                state
                    .steps
                    .iter()
                    .filter(|row| row.user_id == user_id && row.step_date >= since)
                    .map(|row| row.step_date),
            )
            .collect();
        Ok(days.len() as i64)
    }

    async fn monthly_workout_counts(
        &self,
        user_id: i64,
        since: Date,
    ) -> Result<Vec<MonthWorkoutCount>, RepoError> {
        let mut counts = [0i64; 12];
        for workout in self
            .state()
            .workouts
            .iter()
            .filter(|workout| workout.user_id == user_id && workout.date >= since)
        {
            counts[u8::from(workout.date.month()) as usize - 1] += 1;
        }

        Ok(counts
            .iter()
            .enumerate()
            .filter(|(_, workouts)| **workouts > 0)
            .map(|(index, workouts)| MonthWorkoutCount {
                month: index as i32 + 1,
                workouts: *workouts,
            })
            .collect())
    }
}

/// A cache store that is always unreachable.
pub struct FailingStore;

#[async_trait]
impl CacheStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Backend("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".to_string()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub repos: Arc<FakeRepos>,
    pub store: Arc<MemoryStore>,
}

pub fn test_app() -> TestApp {
    let repos = FakeRepos::new();
    let store = Arc::new(MemoryStore::new(&CacheConfig::default()));
    let router = router_with(repos.clone(), store.clone());
    TestApp {
        router,
        repos,
        store,
    }
}

pub fn router_with(repos: Arc<FakeRepos>, store: Arc<dyn CacheStore>) -> Router {
    let cache = Arc::new(CacheLayer::new(store, CacheConfig::default()));

    let users_repo: Arc<dyn UsersRepo> = repos.clone();
    let workouts_repo: Arc<dyn WorkoutsRepo> = repos.clone();
    let steps_repo: Arc<dyn StepsRepo> = repos.clone();
    let settings_repo: Arc<dyn SettingsRepo> = repos.clone();
    let dashboard_repo: Arc<dyn DashboardRepo> = repos;

    build_router(ApiState {
        users: Arc::new(UserService::new(users_repo, cache.clone())),
        workouts: Arc::new(WorkoutService::new(workouts_repo, cache.clone())),
        steps: Arc::new(StepsService::new(steps_repo)),
        settings: Arc::new(SettingsService::new(settings_repo, cache)),
        dashboard: Arc::new(DashboardService::new(dashboard_repo)),
    })
}

/// Drive one request through the router and decode the JSON body.
pub async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn cache_entry(store: &MemoryStore, key: &str) -> Option<String> {
    CacheStore::get(store, key).await.expect("cache get")
}
