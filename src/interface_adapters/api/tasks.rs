use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::failure::ClientError;
use crate::domain::ports::TasksApi;
use crate::domain::task::{
    ConvertToActivity, CreateTask, CreateTaskList, RollingGeneration, Task, TaskActivity,
    TaskComplete, TaskFilter, TaskList, UpdateTask, UpdateTaskList,
};
use crate::interface_adapters::clients::{ApiClient, ApiRequest};

#[async_trait]
impl TasksApi for ApiClient {
    async fn list_task_lists(&self) -> Result<Vec<TaskList>, ClientError> {
        self.send(ApiRequest::get("api/v1/task-lists")).await
    }

    async fn create_task_list(&self, data: &CreateTaskList) -> Result<TaskList, ClientError> {
        self.send(ApiRequest::post("api/v1/task-lists").json(data)?)
            .await
    }

    async fn update_task_list(
        &self,
        id: Uuid,
        data: &UpdateTaskList,
    ) -> Result<TaskList, ClientError> {
        self.send(ApiRequest::patch(format!("api/v1/task-lists/{id}")).json(data)?)
            .await
    }

    async fn delete_task_list(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_discarding(ApiRequest::delete(format!("api/v1/task-lists/{id}")))
            .await
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ClientError> {
        self.send(ApiRequest::get("api/v1/tasks").query_pairs(filter.query_pairs()))
            .await
    }

    async fn get_task(&self, id: Uuid) -> Result<Task, ClientError> {
        self.send(ApiRequest::get(format!("api/v1/tasks/{id}"))).await
    }

    async fn create_task(&self, data: &CreateTask) -> Result<Task, ClientError> {
        self.send(ApiRequest::post("api/v1/tasks").json(data)?).await
    }

    async fn update_task(&self, id: Uuid, data: &UpdateTask) -> Result<Task, ClientError> {
        self.send(ApiRequest::patch(format!("api/v1/tasks/{id}")).json(data)?)
            .await
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_discarding(ApiRequest::delete(format!("api/v1/tasks/{id}")))
            .await
    }

    async fn complete_task(&self, id: Uuid, data: &TaskComplete) -> Result<Task, ClientError> {
        self.send(ApiRequest::post(format!("api/v1/tasks/{id}/complete")).json(data)?)
            .await
    }

    async fn convert_to_activity(
        &self,
        id: Uuid,
        data: &ConvertToActivity,
    ) -> Result<TaskActivity, ClientError> {
        let request =
            ApiRequest::post(format!("api/v1/tasks/{id}/convert-to-activity")).json(data)?;
        self.send(request).await
    }

    async fn generate_occurrences(&self, id: Uuid, count: u32) -> Result<Vec<Task>, ClientError> {
        let request = ApiRequest::post(format!("api/v1/tasks/{id}/generate-occurrences"))
            .query("count", count);
        self.send(request).await
    }

    async fn generate_rolling(&self) -> Result<RollingGeneration, ClientError> {
        self.send(ApiRequest::post("api/v1/tasks/generate-rolling"))
            .await
    }
}
