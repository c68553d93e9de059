use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::activity::Activity;
use crate::domain::failure::ClientError;
use crate::domain::ports::TimerApi;
use crate::domain::validation::{Validate, ValidationIssue, hh_mm};
use crate::interface_adapters::clients::{ApiClient, ApiRequest};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartTimer {
    category_id: Uuid,
}

impl Validate for StartTimer {
    fn validate(&self) -> Result<(), ValidationIssue> {
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StopTimerAt<'a> {
    end_time: &'a str,
}

impl Validate for StopTimerAt<'_> {
    fn validate(&self) -> Result<(), ValidationIssue> {
        hh_mm("endTime", self.end_time)
    }
}

#[async_trait]
impl TimerApi for ApiClient {
    async fn start_timer(&self, category_id: Uuid) -> Result<Activity, ClientError> {
        self.send(ApiRequest::post("api/v1/timer/start").json(&StartTimer { category_id })?)
            .await
    }

    async fn stop_timer(&self) -> Result<Activity, ClientError> {
        self.send(ApiRequest::post("api/v1/timer/stop")).await
    }

    async fn stop_timer_at(&self, end_time: &str) -> Result<Activity, ClientError> {
        self.send(ApiRequest::post("api/v1/timer/stop-at").json(&StopTimerAt { end_time })?)
            .await
    }

    async fn active_timer(&self) -> Result<Option<Activity>, ClientError> {
        self.send_optional(ApiRequest::get("api/v1/timer/active"))
            .await
    }
}
