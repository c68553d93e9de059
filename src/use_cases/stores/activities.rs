use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::try_join_all;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::activity::{Activity, CreateActivity, UpdateActivity};
use crate::domain::failure::ClientError;
use crate::domain::ports::ActivitiesApi;
use crate::use_cases::error_handler::ErrorHandler;
use crate::use_cases::stores::{
    Action, ListState, LoadStatus, action, remove_by_id, replace_by_id, track,
};

const FETCH: Action = action("Failed to fetch activities", "Fetching Activities");
const FETCH_BY_DATE: Action = action("Failed to fetch activities", "Fetching Activities by Date");
const FETCH_RANGE: Action = action(
    "Failed to fetch activities",
    "Fetching Activities by Date Range",
);
const CREATE: Action = action("Failed to create activity", "Creating Activity");
const UPDATE: Action = action("Failed to update activity", "Updating Activity");
const DELETE: Action = action("Failed to delete activity", "Deleting Activity");

/// Every day from `start` to `end`, both included. Empty when `end < start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

pub struct ActivitiesStore {
    api: Arc<dyn ActivitiesApi>,
    errors: Arc<ErrorHandler>,
    state: RwLock<ListState<Activity>>,
}

impl ActivitiesStore {
    pub fn new(api: Arc<dyn ActivitiesApi>, errors: Arc<ErrorHandler>) -> Self {
        Self {
            api,
            errors,
            state: RwLock::new(ListState::default()),
        }
    }

    pub async fn activities(&self) -> Vec<Activity> {
        self.state.read().await.items.clone()
    }

    pub async fn status(&self) -> LoadStatus {
        self.state.read().await.status.clone()
    }

    pub async fn fetch_activities(&self) -> Result<Vec<Activity>, ClientError> {
        let activities = track(
            &self.state,
            &self.errors,
            FETCH,
            self.api.list_activities(),
            |state, activities: &Vec<Activity>| state.items = activities.clone(),
        )
        .await?;
        tracing::info!(count = activities.len(), "activities fetched");
        Ok(activities)
    }

    pub async fn fetch_by_date(&self, date: NaiveDate) -> Result<Vec<Activity>, ClientError> {
        let activities = track(
            &self.state,
            &self.errors,
            FETCH_BY_DATE,
            self.api.list_activities_by_date(date),
            |state, activities: &Vec<Activity>| state.items = activities.clone(),
        )
        .await?;
        tracing::info!(%date, count = activities.len(), "activities fetched by date");
        Ok(activities)
    }

    /// Fetches each date concurrently and caches the results flattened in
    /// the order the dates were given. One failed date fails the whole range.
    pub async fn fetch_by_dates(&self, dates: &[NaiveDate]) -> Result<Vec<Activity>, ClientError> {
        let api = &self.api;
        let requests = dates.iter().map(|date| api.list_activities_by_date(*date));
        let activities = track(
            &self.state,
            &self.errors,
            FETCH_RANGE,
            async { Ok(try_join_all(requests).await?.concat()) },
            |state, activities: &Vec<Activity>| state.items = activities.clone(),
        )
        .await?;
        tracing::info!(
            date_count = dates.len(),
            activity_count = activities.len(),
            "activities fetched by date range"
        );
        Ok(activities)
    }

    pub async fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Activity>, ClientError> {
        self.fetch_by_dates(&days_between(start, end)).await
    }

    pub async fn create_activity(&self, data: &CreateActivity) -> Result<Activity, ClientError> {
        let created = track(
            &self.state,
            &self.errors,
            CREATE,
            self.api.create_activity(data),
            |state, activity: &Activity| state.items.push(activity.clone()),
        )
        .await?;
        tracing::info!(activity_id = %created.id, "activity created");
        Ok(created)
    }

    pub async fn update_activity(
        &self,
        id: Uuid,
        data: &UpdateActivity,
    ) -> Result<Activity, ClientError> {
        let updated = track(
            &self.state,
            &self.errors,
            UPDATE,
            self.api.update_activity(id, data),
            |state, activity: &Activity| replace_by_id(&mut state.items, activity),
        )
        .await?;
        tracing::info!(activity_id = %id, "activity updated");
        Ok(updated)
    }

    pub async fn delete_activity(&self, id: Uuid) -> Result<(), ClientError> {
        track(
            &self.state,
            &self.errors,
            DELETE,
            self.api.delete_activity(id),
            |state, _: &()| remove_by_id(&mut state.items, id),
        )
        .await?;
        tracing::info!(activity_id = %id, "activity deleted");
        Ok(())
    }
}
