use async_trait::async_trait;

use crate::domain::failure::ClientError;
use crate::domain::import::{ImportFile, ImportResponse};
use crate::domain::ports::ImportApi;
use crate::interface_adapters::clients::{ApiClient, ApiRequest};

#[async_trait]
impl ImportApi for ApiClient {
    async fn import_excel(&self, file: ImportFile) -> Result<ImportResponse, ClientError> {
        let request = ApiRequest::post("api/v1/import/excel").file("file", file.file_name, file.bytes);
        self.send(request).await
    }
}
