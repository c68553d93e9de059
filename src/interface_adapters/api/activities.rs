use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::activity::{Activity, CreateActivity, UpdateActivity};
use crate::domain::failure::ClientError;
use crate::domain::ports::ActivitiesApi;
use crate::interface_adapters::clients::{ApiClient, ApiRequest};

#[async_trait]
impl ActivitiesApi for ApiClient {
    async fn list_activities(&self) -> Result<Vec<Activity>, ClientError> {
        self.send(ApiRequest::get("api/v1/activities")).await
    }

    async fn list_activities_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Activity>, ClientError> {
        self.send(ApiRequest::get(format!("api/v1/activities/date/{date}")))
            .await
    }

    async fn get_activity(&self, id: Uuid) -> Result<Activity, ClientError> {
        self.send(ApiRequest::get(format!("api/v1/activities/{id}")))
            .await
    }

    async fn create_activity(&self, data: &CreateActivity) -> Result<Activity, ClientError> {
        self.send(ApiRequest::post("api/v1/activities").json(data)?)
            .await
    }

    async fn update_activity(
        &self,
        id: Uuid,
        data: &UpdateActivity,
    ) -> Result<Activity, ClientError> {
        self.send(ApiRequest::put(format!("api/v1/activities/{id}")).json(data)?)
            .await
    }

    async fn delete_activity(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_discarding(ApiRequest::delete(format!("api/v1/activities/{id}")))
            .await
    }
}
