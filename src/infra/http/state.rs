use std::sync::Arc;

use crate::application::dashboard::DashboardService;
use crate::application::settings::SettingsService;
use crate::application::steps::StepsService;
use crate::application::users::UserService;
use crate::application::workouts::WorkoutService;

/// Explicitly constructed handles, injected at startup; no module-level
/// singletons anywhere.
#[derive(Clone)]
pub struct ApiState {
    pub users: Arc<UserService>,
    pub workouts: Arc<WorkoutService>,
    pub steps: Arc<StepsService>,
    pub settings: Arc<SettingsService>,
    pub dashboard: Arc<DashboardService>,
}
