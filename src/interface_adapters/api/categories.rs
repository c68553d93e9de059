use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::category::{Category, CreateCategory, UpdateCategory};
use crate::domain::failure::ClientError;
use crate::domain::ports::CategoriesApi;
use crate::interface_adapters::clients::{ApiClient, ApiRequest};

#[async_trait]
impl CategoriesApi for ApiClient {
    async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.send(ApiRequest::get("api/v1/categories")).await
    }

    async fn get_category(&self, id: Uuid) -> Result<Category, ClientError> {
        self.send(ApiRequest::get(format!("api/v1/categories/{id}")))
            .await
    }

    async fn create_category(&self, data: &CreateCategory) -> Result<Category, ClientError> {
        self.send(ApiRequest::post("api/v1/categories").json(data)?)
            .await
    }

    async fn update_category(
        &self,
        id: Uuid,
        data: &UpdateCategory,
    ) -> Result<Category, ClientError> {
        self.send(ApiRequest::patch(format!("api/v1/categories/{id}")).json(data)?)
            .await
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_discarding(ApiRequest::delete(format!("api/v1/categories/{id}")))
            .await
    }
}
