use async_trait::async_trait;

use crate::domain::constraints::{GlobalConstraints, UpdateGlobalConstraints};
use crate::domain::failure::ClientError;
use crate::domain::ports::ConstraintsApi;
use crate::interface_adapters::clients::{ApiClient, ApiRequest};

#[async_trait]
impl ConstraintsApi for ApiClient {
    async fn get_constraints(&self) -> Result<GlobalConstraints, ClientError> {
        self.send(ApiRequest::get("api/v1/global-constraints")).await
    }

    async fn update_constraints(
        &self,
        data: &UpdateGlobalConstraints,
    ) -> Result<GlobalConstraints, ClientError> {
        self.send(ApiRequest::patch("api/v1/global-constraints").json(data)?)
            .await
    }
}
