use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::category::{CreateGroup, Group, UpdateGroup};
use crate::domain::failure::ClientError;
use crate::domain::ports::GroupsApi;
use crate::use_cases::error_handler::ErrorHandler;
use crate::use_cases::stores::{
    Action, ListState, LoadStatus, action, remove_by_id, replace_by_id, track,
};

const FETCH: Action = action("Failed to fetch groups", "Fetching Groups");
const CREATE: Action = action("Failed to create group", "Creating Group");
const UPDATE: Action = action("Failed to update group", "Updating Group");
const DELETE: Action = action("Failed to delete group", "Deleting Group");

pub struct GroupsStore {
    api: Arc<dyn GroupsApi>,
    errors: Arc<ErrorHandler>,
    state: RwLock<ListState<Group>>,
}

impl GroupsStore {
    pub fn new(api: Arc<dyn GroupsApi>, errors: Arc<ErrorHandler>) -> Self {
        Self {
            api,
            errors,
            state: RwLock::new(ListState::default()),
        }
    }

    pub async fn groups(&self) -> Vec<Group> {
        self.state.read().await.items.clone()
    }

    pub async fn status(&self) -> LoadStatus {
        self.state.read().await.status.clone()
    }

    pub async fn fetch_groups(&self) -> Result<Vec<Group>, ClientError> {
        let groups = track(
            &self.state,
            &self.errors,
            FETCH,
            self.api.list_groups(),
            |state, groups: &Vec<Group>| state.items = groups.clone(),
        )
        .await?;
        tracing::info!(count = groups.len(), "groups fetched");
        Ok(groups)
    }

    pub async fn create_group(&self, data: &CreateGroup) -> Result<Group, ClientError> {
        let created = track(
            &self.state,
            &self.errors,
            CREATE,
            self.api.create_group(data),
            |state, group: &Group| state.items.push(group.clone()),
        )
        .await?;
        tracing::info!(group_id = %created.id, "group created");
        Ok(created)
    }

    pub async fn update_group(&self, id: Uuid, data: &UpdateGroup) -> Result<Group, ClientError> {
        let updated = track(
            &self.state,
            &self.errors,
            UPDATE,
            self.api.update_group(id, data),
            |state, group: &Group| replace_by_id(&mut state.items, group),
        )
        .await?;
        tracing::info!(group_id = %id, "group updated");
        Ok(updated)
    }

    pub async fn delete_group(&self, id: Uuid) -> Result<(), ClientError> {
        track(
            &self.state,
            &self.errors,
            DELETE,
            self.api.delete_group(id),
            |state, _: &()| remove_by_id(&mut state.items, id),
        )
        .await?;
        tracing::info!(group_id = %id, "group deleted");
        Ok(())
    }
}
