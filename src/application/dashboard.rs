//! Monthly dashboard aggregates.

use std::sync::Arc;

use serde::Serialize;
use time::{Date, Month, OffsetDateTime};

use crate::application::error::AppError;
use crate::application::repos::{DashboardRepo, MonthWorkoutCount};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrendPoint {
    pub month: &'static str,
    pub workouts: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_workouts: i64,
    pub total_steps: i64,
    pub active_days: i64,
    pub monthly_data: Vec<MonthlyTrendPoint>,
}

/// Aggregates are recomputed on every request, as cheap grouped queries
/// over one user's rows; nothing here is cached.
pub struct DashboardService {
    dashboard: Arc<dyn DashboardRepo>,
}

impl DashboardService {
    pub fn new(dashboard: Arc<dyn DashboardRepo>) -> Self {
        Self { dashboard }
    }

    /// Month-to-date totals plus the calendar-year workout trend.
    pub async fn summary(&self, user_id: i64) -> Result<DashboardSummary, AppError> {
        let today = OffsetDateTime::now_utc().date();
        let month_start = today
            .replace_day(1)
            .map_err(|err| AppError::unexpected(format!("month start: {err}")))?;
        let year_start = Date::from_calendar_date(today.year(), Month::January, 1)
            .map_err(|err| AppError::unexpected(format!("year start: {err}")))?;

        let (total_workouts, total_steps, active_days, per_month) = tokio::try_join!(
            self.dashboard.workout_count_since(user_id, month_start),
            self.dashboard.step_total_since(user_id, month_start),
            self.dashboard.active_days_since(user_id, month_start),
            self.dashboard.monthly_workout_counts(user_id, year_start),
        )?;

        Ok(DashboardSummary {
            total_workouts,
            total_steps,
            active_days,
            monthly_data: zero_filled_trend(&per_month),
        })
    }
}

/// Expand sparse per-month counts into a Jan..Dec series, filling months
/// without workouts with zero.
fn zero_filled_trend(counts: &[MonthWorkoutCount]) -> Vec<MonthlyTrendPoint> {
    MONTH_LABELS
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let month = index as i32 + 1;
            let workouts = counts
                .iter()
                .find(|count| count.month == month)
                .map(|count| count.workouts)
                .unwrap_or(0);
            MonthlyTrendPoint {
                month: label,
                workouts,
            }
        })
        .collect()
}
