use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::failure::ClientError;
use crate::domain::ports::TasksApi;
use crate::domain::task::{
    ConvertToActivity, CreateTask, CreateTaskList, RollingGeneration, Task, TaskActivity,
    TaskComplete, TaskFilter, TaskList, TaskStatus, UpdateTask, UpdateTaskList,
};
use crate::use_cases::error_handler::ErrorHandler;
use crate::use_cases::stores::{
    Action, LoadStatus, Tracked, action, remove_by_id, replace_by_id, track,
};

pub const DEFAULT_OCCURRENCES: u32 = 10;

const FETCH_LISTS: Action = action("Failed to fetch task lists", "Fetching Task Lists");
const CREATE_LIST: Action = action("Failed to create task list", "Creating Task List");
const UPDATE_LIST: Action = action("Failed to update task list", "Updating Task List");
const DELETE_LIST: Action = action("Failed to delete task list", "Deleting Task List");
const FETCH: Action = action("Failed to fetch tasks", "Fetching Tasks");
const CREATE: Action = action("Failed to create task", "Creating Task");
const UPDATE: Action = action("Failed to update task", "Updating Task");
const DELETE: Action = action("Failed to delete task", "Deleting Task");
const COMPLETE: Action = action("Failed to complete task", "Completing Task");
const CONVERT: Action = action(
    "Failed to convert task to activity",
    "Converting Task to Activity",
);
const GENERATE: Action = action("Failed to generate occurrences", "Generating Occurrences");
const GENERATE_ROLLING: Action = action(
    "Failed to generate recurring tasks",
    "Generating Recurring Tasks",
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskView {
    #[default]
    Today,
    Week,
    All,
}

impl TaskView {
    /// Unscheduled tasks are visible in every view.
    pub fn includes(&self, task: &Task, today: NaiveDate) -> bool {
        let Some(scheduled) = task.scheduled_date else {
            return true;
        };
        match self {
            TaskView::Today => scheduled == today,
            TaskView::Week => {
                let (monday, sunday) = week_bounds(today);
                (monday..=sunday).contains(&scheduled)
            }
            TaskView::All => true,
        }
    }
}

// Monday through Sunday of the week containing `day`.
pub fn week_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(day.weekday().num_days_from_monday());
    let monday = day.checked_sub_days(Days::new(offset)).unwrap_or(day);
    let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
    (monday, sunday)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskBuckets {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

#[derive(Debug, Clone, Default)]
pub struct TasksState {
    pub task_lists: Vec<TaskList>,
    pub tasks: Vec<Task>,
    pub active_list_id: Option<Uuid>,
    pub view: TaskView,
    pub status: LoadStatus,
}

impl Tracked for TasksState {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

impl TasksState {
    // Tasks passing the view and the active-list filter.
    fn visible(&self, today: NaiveDate) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| self.view.includes(task, today))
            .filter(|task| {
                self.active_list_id
                    .is_none_or(|list_id| task.task_list_id == list_id)
            })
            .cloned()
            .collect()
    }
}

pub struct TasksStore {
    api: Arc<dyn TasksApi>,
    errors: Arc<ErrorHandler>,
    state: RwLock<TasksState>,
}

impl TasksStore {
    pub fn new(api: Arc<dyn TasksApi>, errors: Arc<ErrorHandler>) -> Self {
        Self {
            api,
            errors,
            state: RwLock::new(TasksState::default()),
        }
    }

    pub async fn snapshot(&self) -> TasksState {
        self.state.read().await.clone()
    }

    pub async fn status(&self) -> LoadStatus {
        self.state.read().await.status.clone()
    }

    pub async fn active_list(&self) -> Option<TaskList> {
        let state = self.state.read().await;
        let active = state.active_list_id?;
        state.task_lists.iter().find(|list| list.id == active).cloned()
    }

    pub async fn set_active_list(&self, id: Option<Uuid>) {
        self.state.write().await.active_list_id = id;
    }

    pub async fn set_view(&self, view: TaskView) {
        self.state.write().await.view = view;
    }

    pub async fn visible_tasks(&self, today: NaiveDate) -> Vec<Task> {
        self.state.read().await.visible(today)
    }

    pub async fn buckets(&self, today: NaiveDate) -> TaskBuckets {
        let mut buckets = TaskBuckets::default();
        for task in self.visible_tasks(today).await {
            match task.status {
                TaskStatus::Todo => buckets.todo.push(task),
                TaskStatus::InProgress => buckets.in_progress.push(task),
                TaskStatus::Done => buckets.done.push(task),
            }
        }
        buckets
    }

    pub async fn fetch_task_lists(&self) -> Result<Vec<TaskList>, ClientError> {
        let lists = track(
            &self.state,
            &self.errors,
            FETCH_LISTS,
            self.api.list_task_lists(),
            |state, lists: &Vec<TaskList>| state.task_lists = lists.clone(),
        )
        .await?;
        tracing::info!(count = lists.len(), "task lists fetched");
        Ok(lists)
    }

    pub async fn create_task_list(&self, data: &CreateTaskList) -> Result<TaskList, ClientError> {
        let created = track(
            &self.state,
            &self.errors,
            CREATE_LIST,
            self.api.create_task_list(data),
            |state, list: &TaskList| state.task_lists.push(list.clone()),
        )
        .await?;
        tracing::info!(list_id = %created.id, "task list created");
        Ok(created)
    }

    pub async fn update_task_list(
        &self,
        id: Uuid,
        data: &UpdateTaskList,
    ) -> Result<TaskList, ClientError> {
        let updated = track(
            &self.state,
            &self.errors,
            UPDATE_LIST,
            self.api.update_task_list(id, data),
            |state, list: &TaskList| replace_by_id(&mut state.task_lists, list),
        )
        .await?;
        tracing::info!(list_id = %id, "task list updated");
        Ok(updated)
    }

    pub async fn delete_task_list(&self, id: Uuid) -> Result<(), ClientError> {
        track(
            &self.state,
            &self.errors,
            DELETE_LIST,
            self.api.delete_task_list(id),
            |state, _: &()| {
                remove_by_id(&mut state.task_lists, id);
                if state.active_list_id == Some(id) {
                    state.active_list_id = None;
                }
            },
        )
        .await?;
        tracing::info!(list_id = %id, "task list deleted");
        Ok(())
    }

    pub async fn fetch_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ClientError> {
        let tasks = track(
            &self.state,
            &self.errors,
            FETCH,
            self.api.list_tasks(filter),
            |state, tasks: &Vec<Task>| state.tasks = tasks.clone(),
        )
        .await?;
        tracing::info!(count = tasks.len(), "tasks fetched");
        Ok(tasks)
    }

    pub async fn create_task(&self, data: &CreateTask) -> Result<Task, ClientError> {
        let created = track(
            &self.state,
            &self.errors,
            CREATE,
            self.api.create_task(data),
            |state, task: &Task| state.tasks.push(task.clone()),
        )
        .await?;
        tracing::info!(task_id = %created.id, "task created");
        Ok(created)
    }

    pub async fn update_task(&self, id: Uuid, data: &UpdateTask) -> Result<Task, ClientError> {
        let updated = track(
            &self.state,
            &self.errors,
            UPDATE,
            self.api.update_task(id, data),
            |state, task: &Task| replace_by_id(&mut state.tasks, task),
        )
        .await?;
        tracing::info!(task_id = %id, "task updated");
        Ok(updated)
    }

    pub async fn delete_task(&self, id: Uuid) -> Result<(), ClientError> {
        track(
            &self.state,
            &self.errors,
            DELETE,
            self.api.delete_task(id),
            |state, _: &()| remove_by_id(&mut state.tasks, id),
        )
        .await?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }

    pub async fn complete_task(&self, id: Uuid, data: &TaskComplete) -> Result<Task, ClientError> {
        let completed = track(
            &self.state,
            &self.errors,
            COMPLETE,
            self.api.complete_task(id, data),
            |state, task: &Task| replace_by_id(&mut state.tasks, task),
        )
        .await?;
        tracing::info!(task_id = %id, added_to_tracker = data.add_to_tracker, "task completed");
        Ok(completed)
    }

    // The cached task is marked done and linked to the new activity.
    pub async fn convert_to_activity(
        &self,
        id: Uuid,
        data: &ConvertToActivity,
    ) -> Result<TaskActivity, ClientError> {
        let link = track(
            &self.state,
            &self.errors,
            CONVERT,
            self.api.convert_to_activity(id, data),
            |state, link: &TaskActivity| {
                if let Some(task) = state.tasks.iter_mut().find(|task| task.id == id) {
                    task.status = TaskStatus::Done;
                    task.activity_ids.push(link.activity_id);
                }
            },
        )
        .await?;
        tracing::info!(task_id = %id, activity_id = %link.activity_id, "task converted to activity");
        Ok(link)
    }

    pub async fn generate_occurrences(
        &self,
        id: Uuid,
        count: Option<u32>,
    ) -> Result<Vec<Task>, ClientError> {
        let count = count.unwrap_or(DEFAULT_OCCURRENCES);
        let generated = track(
            &self.state,
            &self.errors,
            GENERATE,
            self.api.generate_occurrences(id, count),
            |state, tasks: &Vec<Task>| state.tasks.extend(tasks.iter().cloned()),
        )
        .await?;
        tracing::info!(task_id = %id, count, created = generated.len(), "task occurrences generated");
        Ok(generated)
    }

    pub async fn generate_rolling(&self) -> Result<RollingGeneration, ClientError> {
        let summary = track(
            &self.state,
            &self.errors,
            GENERATE_ROLLING,
            self.api.generate_rolling(),
            |_, _: &RollingGeneration| {},
        )
        .await?;
        tracing::info!(
            created = summary.created_count,
            checked = summary.recurring_tasks_checked,
            "rolling occurrences generated"
        );
        Ok(summary)
    }
}
