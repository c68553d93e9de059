use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::failure::ClientError;
use crate::domain::import::{ImportFile, ImportResponse};
use crate::domain::ports::ImportApi;
use crate::use_cases::error_handler::ErrorHandler;
use crate::use_cases::stores::{Action, LoadStatus, Tracked, action, track};

const IMPORT: Action = action("Failed to import file", "Importing Excel File");

#[derive(Debug, Clone, Default)]
pub struct ImportState {
    pub last: Option<ImportResponse>,
    pub status: LoadStatus,
}

impl Tracked for ImportState {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

pub struct ImportStore {
    api: Arc<dyn ImportApi>,
    errors: Arc<ErrorHandler>,
    state: RwLock<ImportState>,
}

impl ImportStore {
    pub fn new(api: Arc<dyn ImportApi>, errors: Arc<ErrorHandler>) -> Self {
        Self {
            api,
            errors,
            state: RwLock::new(ImportState::default()),
        }
    }

    pub async fn snapshot(&self) -> ImportState {
        self.state.read().await.clone()
    }

    pub async fn import_excel(&self, file: ImportFile) -> Result<ImportResponse, ClientError> {
        let file_name = file.file_name.clone();
        let summary = track(
            &self.state,
            &self.errors,
            IMPORT,
            self.api.import_excel(file),
            |state, summary: &ImportResponse| state.last = Some(summary.clone()),
        )
        .await?;
        if !summary.errors.is_empty() {
            tracing::warn!(
                file_name = %file_name,
                rows_rejected = summary.errors.len(),
                "import finished with row errors"
            );
        }
        tracing::info!(
            file_name = %file_name,
            groups = summary.groups_created,
            categories = summary.categories_created,
            activities = summary.activities_created,
            "excel import finished"
        );
        Ok(summary)
    }
}
