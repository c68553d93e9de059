use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::category::{Category, CreateCategory, UpdateCategory};
use crate::domain::failure::ClientError;
use crate::domain::ports::CategoriesApi;
use crate::use_cases::error_handler::ErrorHandler;
use crate::use_cases::stores::{
    Action, ListState, LoadStatus, action, remove_by_id, replace_by_id, track,
};

const FETCH: Action = action("Failed to fetch categories", "Fetching Categories");
const CREATE: Action = action("Failed to create category", "Creating Category");
const UPDATE: Action = action("Failed to update category", "Updating Category");
const DELETE: Action = action("Failed to delete category", "Deleting Category");

pub struct CategoriesStore {
    api: Arc<dyn CategoriesApi>,
    errors: Arc<ErrorHandler>,
    state: RwLock<ListState<Category>>,
}

impl CategoriesStore {
    pub fn new(api: Arc<dyn CategoriesApi>, errors: Arc<ErrorHandler>) -> Self {
        Self {
            api,
            errors,
            state: RwLock::new(ListState::default()),
        }
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.state.read().await.items.clone()
    }

    pub async fn status(&self) -> LoadStatus {
        self.state.read().await.status.clone()
    }

    pub async fn find(&self, id: Uuid) -> Option<Category> {
        let state = self.state.read().await;
        state.items.iter().find(|category| category.id == id).cloned()
    }

    // Cached categories of one group, highest priority first.
    pub async fn in_group(&self, group_id: Uuid) -> Vec<Category> {
        let state = self.state.read().await;
        let mut categories: Vec<Category> = state
            .items
            .iter()
            .filter(|category| category.group_id == group_id)
            .cloned()
            .collect();
        categories.sort_by_key(|category| category.priority);
        categories
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ClientError> {
        let categories = track(
            &self.state,
            &self.errors,
            FETCH,
            self.api.list_categories(),
            |state, categories: &Vec<Category>| state.items = categories.clone(),
        )
        .await?;
        tracing::info!(count = categories.len(), "categories fetched");
        Ok(categories)
    }

    pub async fn create_category(&self, data: &CreateCategory) -> Result<Category, ClientError> {
        let created = track(
            &self.state,
            &self.errors,
            CREATE,
            self.api.create_category(data),
            |state, category: &Category| state.items.push(category.clone()),
        )
        .await?;
        tracing::info!(category_id = %created.id, "category created");
        Ok(created)
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        data: &UpdateCategory,
    ) -> Result<Category, ClientError> {
        let updated = track(
            &self.state,
            &self.errors,
            UPDATE,
            self.api.update_category(id, data),
            |state, category: &Category| replace_by_id(&mut state.items, category),
        )
        .await?;
        tracing::info!(category_id = %id, "category updated");
        Ok(updated)
    }

    pub async fn delete_category(&self, id: Uuid) -> Result<(), ClientError> {
        track(
            &self.state,
            &self.errors,
            DELETE,
            self.api.delete_category(id),
            |state, _: &()| remove_by_id(&mut state.items, id),
        )
        .await?;
        tracing::info!(category_id = %id, "category deleted");
        Ok(())
    }
}
