use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::category::{CreateGroup, Group, UpdateGroup};
use crate::domain::failure::ClientError;
use crate::domain::ports::GroupsApi;
use crate::interface_adapters::clients::{ApiClient, ApiRequest};

#[async_trait]
impl GroupsApi for ApiClient {
    async fn list_groups(&self) -> Result<Vec<Group>, ClientError> {
        self.send(ApiRequest::get("api/v1/groups")).await
    }

    async fn get_group(&self, id: Uuid) -> Result<Group, ClientError> {
        self.send(ApiRequest::get(format!("api/v1/groups/{id}"))).await
    }

    async fn create_group(&self, data: &CreateGroup) -> Result<Group, ClientError> {
        self.send(ApiRequest::post("api/v1/groups").json(data)?).await
    }

    async fn update_group(&self, id: Uuid, data: &UpdateGroup) -> Result<Group, ClientError> {
        self.send(ApiRequest::patch(format!("api/v1/groups/{id}")).json(data)?)
            .await
    }

    async fn delete_group(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_discarding(ApiRequest::delete(format!("api/v1/groups/{id}")))
            .await
    }
}
