use std::sync::Arc;

use chrono::{NaiveDateTime, NaiveTime};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::activity::Activity;
use crate::domain::failure::ClientError;
use crate::domain::ports::TimerApi;
use crate::use_cases::error_handler::ErrorHandler;
use crate::use_cases::stores::{Action, LoadStatus, Tracked, action, track};

const START: Action = action("Failed to start timer", "Starting Timer");
const STOP: Action = action("Failed to stop timer", "Stopping Timer");
const STOP_AT: Action = action("Failed to stop timer", "Stopping Timer at Time");
const CHECK_ACTIVE: &str = "Checking Active Timer";

/// Seconds since the activity started, measured against `now` in the same
/// local wall clock the backend used for the activity's date and start time.
pub fn elapsed_seconds(activity: &Activity, now: NaiveDateTime) -> i64 {
    let started = NaiveTime::parse_from_str(&activity.start_time, "%H:%M")
        .unwrap_or(NaiveTime::MIN);
    (now - activity.date.and_time(started)).num_seconds()
}

// HH:MM:SS; hours keep growing past 99. Negative spans show as zero.
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

#[derive(Debug, Clone, Default)]
pub struct TimerState {
    pub active: Option<Activity>,
    pub running: bool,
    pub status: LoadStatus,
}

impl Tracked for TimerState {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

impl TimerState {
    fn stopped(&mut self) {
        self.active = None;
        self.running = false;
    }
}

pub struct TimerStore {
    api: Arc<dyn TimerApi>,
    errors: Arc<ErrorHandler>,
    state: RwLock<TimerState>,
}

impl TimerStore {
    pub fn new(api: Arc<dyn TimerApi>, errors: Arc<ErrorHandler>) -> Self {
        Self {
            api,
            errors,
            state: RwLock::new(TimerState::default()),
        }
    }

    pub async fn snapshot(&self) -> TimerState {
        self.state.read().await.clone()
    }

    pub async fn is_running(&self) -> bool {
        self.state.read().await.running
    }

    pub async fn category_id(&self) -> Option<Uuid> {
        let state = self.state.read().await;
        state.active.as_ref().map(|activity| activity.category_id)
    }

    pub async fn elapsed(&self, now: NaiveDateTime) -> Option<i64> {
        let state = self.state.read().await;
        state
            .active
            .as_ref()
            .map(|activity| elapsed_seconds(activity, now))
    }

    pub async fn elapsed_formatted(&self, now: NaiveDateTime) -> String {
        format_elapsed(self.elapsed(now).await.unwrap_or(0))
    }

    pub async fn start(&self, category_id: Uuid) -> Result<Activity, ClientError> {
        let activity = track(
            &self.state,
            &self.errors,
            START,
            self.api.start_timer(category_id),
            |state, activity: &Activity| {
                state.active = Some(activity.clone());
                state.running = true;
            },
        )
        .await?;
        tracing::info!(%category_id, activity_id = %activity.id, "timer started");
        Ok(activity)
    }

    pub async fn stop(&self) -> Result<Activity, ClientError> {
        let activity = track(
            &self.state,
            &self.errors,
            STOP,
            self.api.stop_timer(),
            |state, _: &Activity| state.stopped(),
        )
        .await?;
        tracing::info!(activity_id = %activity.id, "timer stopped");
        Ok(activity)
    }

    pub async fn stop_at(&self, end_time: &str) -> Result<Activity, ClientError> {
        let activity = track(
            &self.state,
            &self.errors,
            STOP_AT,
            self.api.stop_timer_at(end_time),
            |state, _: &Activity| state.stopped(),
        )
        .await?;
        tracing::info!(end_time, "timer stopped at");
        Ok(activity)
    }

    /// Syncs with the backend's running timer. Does not touch loading/error.
    pub async fn check_active(&self) -> Result<Option<Activity>, ClientError> {
        match self.api.active_timer().await {
            Ok(active) => {
                let mut state = self.state.write().await;
                match &active {
                    Some(activity) => {
                        tracing::info!(activity_id = %activity.id, "active timer found");
                        state.active = Some(activity.clone());
                        state.running = true;
                    }
                    None => state.running = false,
                }
                Ok(active)
            }
            Err(err) => {
                self.errors.handle_api_error(&err, Some(CHECK_ACTIVE)).await;
                Err(err)
            }
        }
    }

    pub async fn clear(&self) {
        *self.state.write().await = TimerState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::use_cases::test_support::{FakeBackend, HandlerHarness, sample_activity};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 25)
            .and_then(|date| date.and_hms_opt(h, m, s))
            .expect("valid datetime")
    }

    #[test]
    fn when_elapsed_is_formatted_then_fields_are_zero_padded() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(3_725), "01:02:05");
        assert_eq!(format_elapsed(-5), "00:00:00");
    }

    #[test]
    fn when_activity_started_this_morning_then_elapsed_counts_from_start() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 25).expect("date");
        let activity = sample_activity(date, "09:00", None);

        assert_eq!(elapsed_seconds(&activity, at(10, 30, 15)), 5_415);
    }

    #[tokio::test]
    async fn when_timer_starts_and_stops_then_running_flag_follows() {
        let backend = Arc::new(FakeBackend::new());
        let harness = HandlerHarness::new();
        let store = TimerStore::new(backend.clone(), harness.handler.clone());
        let category = Uuid::new_v4();

        store.start(category).await.expect("start");
        assert!(store.is_running().await);
        assert_eq!(store.category_id().await, Some(category));

        let stopped = store.stop_at("17:45").await.expect("stop");
        assert_eq!(stopped.end_time.as_deref(), Some("17:45"));
        assert!(!store.is_running().await);
        assert_eq!(store.elapsed_formatted(at(18, 0, 0)).await, "00:00:00");
    }

    #[tokio::test]
    async fn when_no_timer_is_running_then_check_reports_none() {
        let backend = Arc::new(FakeBackend::new());
        let harness = HandlerHarness::new();
        let store = TimerStore::new(backend.clone(), harness.handler.clone());

        let active = store.check_active().await.expect("check");

        assert_eq!(active, None);
        assert!(!store.is_running().await);
        assert!(harness.surface.payloads().is_empty());
    }

    #[tokio::test]
    async fn when_stop_fails_then_timer_stays_running() {
        let backend = Arc::new(FakeBackend::new());
        let harness = HandlerHarness::new();
        let store = TimerStore::new(backend.clone(), harness.handler.clone());
        store.start(Uuid::new_v4()).await.expect("start");
        backend.fail_with(ClientError::Timeout);

        let result = store.stop().await;

        assert!(matches!(result, Err(ClientError::Timeout)));
        let state = store.snapshot().await;
        assert!(state.running);
        assert_eq!(state.status.error.as_deref(), Some("Failed to stop timer"));
    }
}
