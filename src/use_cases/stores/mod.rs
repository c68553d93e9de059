// Per-resource state containers. Each keeps a cache plus loading/error status
// and hands failures to the error handler before returning them to the caller.

pub mod activities;
pub mod auth;
pub mod categories;
pub mod constraints;
pub mod groups;
pub mod import;
pub mod insights;
pub mod tasks;
pub mod timer;

use std::future::Future;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::activity::Activity;
use crate::domain::category::{Category, Group};
use crate::domain::failure::ClientError;
use crate::domain::task::{Task, TaskList};
use crate::use_cases::error_handler::ErrorHandler;

pub use activities::ActivitiesStore;
pub use auth::AuthStore;
pub use categories::CategoriesStore;
pub use constraints::ConstraintsStore;
pub use groups::GroupsStore;
pub use import::ImportStore;
pub use insights::InsightsStore;
pub use tasks::{TaskView, TasksStore};
pub use timer::TimerStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadStatus {
    pub loading: bool,
    pub error: Option<String>,
}

// Fixed failure summary kept in the store, and the label passed to the handler.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Action {
    pub(crate) summary: &'static str,
    pub(crate) context: &'static str,
}

pub(crate) const fn action(summary: &'static str, context: &'static str) -> Action {
    Action { summary, context }
}

pub(crate) trait Tracked {
    fn status_mut(&mut self) -> &mut LoadStatus;
}

/// Runs one store action: marks the store loading, awaits `call`, then either
/// applies the result to the state or records the failure and reports it.
pub(crate) async fn track<S, T, F>(
    state: &RwLock<S>,
    errors: &ErrorHandler,
    action: Action,
    call: F,
    apply: impl FnOnce(&mut S, &T),
) -> Result<T, ClientError>
where
    S: Tracked,
    F: Future<Output = Result<T, ClientError>>,
{
    {
        let mut guard = state.write().await;
        let status = guard.status_mut();
        status.loading = true;
        status.error = None;
    }

    let result = call.await;

    let mut guard = state.write().await;
    guard.status_mut().loading = false;
    match result {
        Ok(value) => {
            apply(&mut *guard, &value);
            Ok(value)
        }
        Err(err) => {
            guard.status_mut().error = Some(action.summary.to_string());
            drop(guard);
            errors.handle_api_error(&err, Some(action.context)).await;
            Err(err)
        }
    }
}

pub(crate) trait Keyed {
    fn key(&self) -> Uuid;
}

impl Keyed for Activity {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for Category {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for Group {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for TaskList {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for Task {
    fn key(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub status: LoadStatus,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::default(),
        }
    }
}

impl<T> Tracked for ListState<T> {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

// Cache edits shared by the list-backed stores.
pub(crate) fn replace_by_id<T: Keyed + Clone>(items: &mut [T], updated: &T) {
    if let Some(slot) = items.iter_mut().find(|item| item.key() == updated.key()) {
        *slot = updated.clone();
    }
}

pub(crate) fn remove_by_id<T: Keyed>(items: &mut Vec<T>, id: Uuid) {
    items.retain(|item| item.key() != id);
}
