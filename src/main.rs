use std::process;
use std::sync::Arc;

use stridelog::{
    application::{
        dashboard::DashboardService,
        error::AppError,
        repos::{DashboardRepo, SettingsRepo, StepsRepo, UsersRepo, WorkoutsRepo},
        settings::SettingsService,
        steps::StepsService,
        users::UserService,
        workouts::WorkoutService,
    },
    cache::{CacheConfig, CacheLayer, MemoryStore},
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, ApiState},
        telemetry,
    },
};
use tracing::{dispatcher, error, info, Dispatch, Level};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match cli_args.command {
        Some(config::Command::Serve(_)) | None => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    let repositories = Arc::new(PostgresRepositories::new(pool));
    let state = build_api_state(repositories, &settings);

    let router = http::build_router(state);
    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "stridelog::server",
        addr = %settings.server.addr,
        "listening"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

fn build_api_state(repositories: Arc<PostgresRepositories>, settings: &config::Settings) -> ApiState {
    let cache_config = CacheConfig::from(&settings.cache);
    let store = Arc::new(MemoryStore::new(&cache_config));
    let cache = Arc::new(CacheLayer::new(store, cache_config));

    let users_repo: Arc<dyn UsersRepo> = repositories.clone();
    let workouts_repo: Arc<dyn WorkoutsRepo> = repositories.clone();
    let steps_repo: Arc<dyn StepsRepo> = repositories.clone();
    let settings_repo: Arc<dyn SettingsRepo> = repositories.clone();
    let dashboard_repo: Arc<dyn DashboardRepo> = repositories;

    ApiState {
        users: Arc::new(UserService::new(users_repo, cache.clone())),
        workouts: Arc::new(WorkoutService::new(workouts_repo, cache.clone())),
        steps: Arc::new(StepsService::new(steps_repo)),
        settings: Arc::new(SettingsService::new(settings_repo, cache)),
        dashboard: Arc::new(DashboardService::new(dashboard_repo)),
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(target = "stridelog::server", "shutdown signal received");
    }
}
