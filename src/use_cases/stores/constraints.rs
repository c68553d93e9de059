use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::constraints::{GlobalConstraints, UpdateGlobalConstraints};
use crate::domain::failure::ClientError;
use crate::domain::ports::ConstraintsApi;
use crate::use_cases::error_handler::ErrorHandler;
use crate::use_cases::stores::{Action, LoadStatus, Tracked, action, track};

const FETCH: Action = action("Failed to fetch constraints", "Fetching Global Constraints");
const UPDATE: Action = action("Failed to update constraints", "Updating Global Constraints");

#[derive(Debug, Clone, Default)]
pub struct ConstraintsState {
    pub constraints: Option<GlobalConstraints>,
    pub status: LoadStatus,
}

impl Tracked for ConstraintsState {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

pub struct ConstraintsStore {
    api: Arc<dyn ConstraintsApi>,
    errors: Arc<ErrorHandler>,
    state: RwLock<ConstraintsState>,
}

impl ConstraintsStore {
    pub fn new(api: Arc<dyn ConstraintsApi>, errors: Arc<ErrorHandler>) -> Self {
        Self {
            api,
            errors,
            state: RwLock::new(ConstraintsState::default()),
        }
    }

    pub async fn snapshot(&self) -> ConstraintsState {
        self.state.read().await.clone()
    }

    pub async fn fetch(&self) -> Result<GlobalConstraints, ClientError> {
        let constraints = track(
            &self.state,
            &self.errors,
            FETCH,
            self.api.get_constraints(),
            |state, constraints: &GlobalConstraints| state.constraints = Some(constraints.clone()),
        )
        .await?;
        tracing::info!("global constraints fetched");
        Ok(constraints)
    }

    pub async fn update(
        &self,
        data: &UpdateGlobalConstraints,
    ) -> Result<GlobalConstraints, ClientError> {
        let constraints = track(
            &self.state,
            &self.errors,
            UPDATE,
            self.api.update_constraints(data),
            |state, constraints: &GlobalConstraints| state.constraints = Some(constraints.clone()),
        )
        .await?;
        tracing::info!("global constraints updated");
        Ok(constraints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FakeBackend, HandlerHarness, sample_constraints};

    #[tokio::test]
    async fn when_constraints_are_updated_then_cache_holds_new_values() {
        let backend = Arc::new(FakeBackend::new());
        let harness = HandlerHarness::new();
        backend.seed_constraints(sample_constraints());
        let store = ConstraintsStore::new(backend.clone(), harness.handler.clone());
        store.fetch().await.expect("fetch");

        store
            .update(&UpdateGlobalConstraints {
                min_sleep_hours: Some(49.0),
                ..Default::default()
            })
            .await
            .expect("update");

        let cached = store.snapshot().await.constraints.expect("cached");
        assert_eq!(cached.min_sleep_hours, 49.0);
        assert_eq!(cached.total_weekly_hours, 168.0);
    }
}
