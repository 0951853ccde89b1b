//! HTTP surface: thin route handlers translating verbs and params into
//! service calls.
//!
//! Authentication is an external collaborator: bearer tokens on the
//! Authorization header are issued and verified upstream of this router.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod state;

pub use state::ApiState;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/users", get(handlers::users::list_users))
        .route("/api/users/signup", post(handlers::users::signup))
        .route("/api/users/{id}", get(handlers::users::get_user))
        .route("/api/workouts", post(handlers::workouts::create_workout))
        .route(
            "/api/workouts/{id}",
            get(handlers::workouts::list_workouts)
                .put(handlers::workouts::update_workout)
                .delete(handlers::workouts::delete_workout),
        )
        .route(
            "/api/workouts/details/{id}",
            get(handlers::workouts::workout_details),
        )
        .route("/api/steps/{id}", post(handlers::steps::log_steps))
        .route(
            "/api/settings/{id}",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .route(
            "/api/profile/{id}",
            get(handlers::users::get_profile).put(handlers::users::update_profile),
        )
        .route("/api/dashboard/{id}", get(handlers::dashboard::summary))
        .route("/healthz", get(handlers::health::healthz))
        .route("/livez", get(handlers::health::livez))
        .layer(axum_middleware::from_fn(middleware::log_responses))
        .layer(axum_middleware::from_fn(middleware::set_request_context))
        .with_state(state)
}
