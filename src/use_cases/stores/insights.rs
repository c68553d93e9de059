use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::failure::ClientError;
use crate::domain::insights::{DailyInsight, WeeklyInsight};
use crate::domain::ports::InsightsApi;
use crate::use_cases::error_handler::ErrorHandler;
use crate::use_cases::stores::{Action, LoadStatus, Tracked, action, track};

const DAILY: Action = action("Failed to fetch daily insights", "Fetching Daily Insights");
const WEEKLY: Action = action("Failed to fetch weekly insights", "Fetching Weekly Insights");

#[derive(Debug, Clone, Default)]
pub struct InsightsState {
    pub daily: Option<DailyInsight>,
    pub weekly: Option<WeeklyInsight>,
    pub status: LoadStatus,
}

impl Tracked for InsightsState {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

pub struct InsightsStore {
    api: Arc<dyn InsightsApi>,
    errors: Arc<ErrorHandler>,
    state: RwLock<InsightsState>,
}

impl InsightsStore {
    pub fn new(api: Arc<dyn InsightsApi>, errors: Arc<ErrorHandler>) -> Self {
        Self {
            api,
            errors,
            state: RwLock::new(InsightsState::default()),
        }
    }

    pub async fn snapshot(&self) -> InsightsState {
        self.state.read().await.clone()
    }

    // Without a date the backend compares today with yesterday.
    pub async fn fetch_daily(&self, date: Option<NaiveDate>) -> Result<DailyInsight, ClientError> {
        let insight = track(
            &self.state,
            &self.errors,
            DAILY,
            self.api.daily_comparison(date),
            |state, insight: &DailyInsight| state.daily = Some(insight.clone()),
        )
        .await?;
        tracing::info!(date = %insight.date, total_minutes = insight.total_minutes, "daily insights fetched");
        Ok(insight)
    }

    pub async fn fetch_weekly(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<WeeklyInsight, ClientError> {
        let insight = track(
            &self.state,
            &self.errors,
            WEEKLY,
            self.api.weekly_comparison(date),
            |state, insight: &WeeklyInsight| state.weekly = Some(insight.clone()),
        )
        .await?;
        tracing::info!(
            week_start = %insight.week_start_date,
            total_minutes = insight.total_minutes,
            "weekly insights fetched"
        );
        Ok(insight)
    }
}
