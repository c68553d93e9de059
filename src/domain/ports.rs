use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::activity::{Activity, CreateActivity, UpdateActivity};
use crate::domain::auth::{ActiveSessions, LoginResponse, LogoutAllResponse, MeResponse};
use crate::domain::category::{
    Category, CreateCategory, CreateGroup, Group, UpdateCategory, UpdateGroup,
};
use crate::domain::constraints::{GlobalConstraints, UpdateGlobalConstraints};
use crate::domain::failure::{ClientError, StorageError};
use crate::domain::import::{ImportFile, ImportResponse};
use crate::domain::insights::{DailyInsight, WeeklyInsight};
use crate::domain::task::{
    ConvertToActivity, CreateTask, CreateTaskList, RollingGeneration, Task, TaskActivity,
    TaskComplete, TaskFilter, TaskList, UpdateTask, UpdateTaskList,
};
use crate::domain::toast::ToastPayload;

// Port for durable client-side key/value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_seconds(&self) -> u64;
}

// Port for reading the expiry of an access token without validating it.
pub trait TokenInspector: Send + Sync {
    fn expires_at(&self, token: &str) -> Option<u64>;
}

// Port for whatever renders toasts. The surface owns toast ids.
pub trait ToastSurface: Send + Sync {
    fn add_toast(&self, payload: ToastPayload) -> String;
    fn remove_toast(&self, id: &str);
}

// Port for moving the session to the login entry point.
pub trait Navigator: Send + Sync {
    fn navigate_to_login(&self);
}

// Port for resolving message keys to display text.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryLevel {
    Fatal,
    Error,
    Warning,
    Info,
}

impl TelemetryLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TelemetryLevel::Fatal => "fatal",
            TelemetryLevel::Error => "error",
            TelemetryLevel::Warning => "warning",
            TelemetryLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryEvent {
    pub message: String,
    pub level: TelemetryLevel,
    pub tags: Vec<(String, String)>,
    pub extra: Map<String, Value>,
    pub environment: Option<String>,
    pub release: Option<String>,
}

// Port for remote error monitoring.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    async fn capture(&self, event: TelemetryEvent) -> Result<(), String>;
}

// Port for obtaining a fresh access token through the shared refresh path.
#[async_trait]
pub trait SessionRefresher: Send + Sync {
    async fn refresh_session(&self) -> Result<String, ClientError>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login_with_google(&self, google_token: &str) -> Result<LoginResponse, ClientError>;
    async fn me(&self) -> Result<MeResponse, ClientError>;
    async fn logout(&self) -> Result<(), ClientError>;
    async fn logout_all(&self) -> Result<LogoutAllResponse, ClientError>;
    async fn active_sessions(&self) -> Result<ActiveSessions, ClientError>;
}

#[async_trait]
pub trait ActivitiesApi: Send + Sync {
    async fn list_activities(&self) -> Result<Vec<Activity>, ClientError>;
    async fn list_activities_by_date(&self, date: NaiveDate)
    -> Result<Vec<Activity>, ClientError>;
    async fn get_activity(&self, id: Uuid) -> Result<Activity, ClientError>;
    async fn create_activity(&self, data: &CreateActivity) -> Result<Activity, ClientError>;
    async fn update_activity(
        &self,
        id: Uuid,
        data: &UpdateActivity,
    ) -> Result<Activity, ClientError>;
    async fn delete_activity(&self, id: Uuid) -> Result<(), ClientError>;
}

#[async_trait]
pub trait CategoriesApi: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, ClientError>;
    async fn get_category(&self, id: Uuid) -> Result<Category, ClientError>;
    async fn create_category(&self, data: &CreateCategory) -> Result<Category, ClientError>;
    async fn update_category(
        &self,
        id: Uuid,
        data: &UpdateCategory,
    ) -> Result<Category, ClientError>;
    async fn delete_category(&self, id: Uuid) -> Result<(), ClientError>;
}

#[async_trait]
pub trait GroupsApi: Send + Sync {
    async fn list_groups(&self) -> Result<Vec<Group>, ClientError>;
    async fn get_group(&self, id: Uuid) -> Result<Group, ClientError>;
    async fn create_group(&self, data: &CreateGroup) -> Result<Group, ClientError>;
    async fn update_group(&self, id: Uuid, data: &UpdateGroup) -> Result<Group, ClientError>;
    async fn delete_group(&self, id: Uuid) -> Result<(), ClientError>;
}

#[async_trait]
pub trait TasksApi: Send + Sync {
    async fn list_task_lists(&self) -> Result<Vec<TaskList>, ClientError>;
    async fn create_task_list(&self, data: &CreateTaskList) -> Result<TaskList, ClientError>;
    async fn update_task_list(
        &self,
        id: Uuid,
        data: &UpdateTaskList,
    ) -> Result<TaskList, ClientError>;
    async fn delete_task_list(&self, id: Uuid) -> Result<(), ClientError>;

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ClientError>;
    async fn get_task(&self, id: Uuid) -> Result<Task, ClientError>;
    async fn create_task(&self, data: &CreateTask) -> Result<Task, ClientError>;
    async fn update_task(&self, id: Uuid, data: &UpdateTask) -> Result<Task, ClientError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), ClientError>;
    async fn complete_task(&self, id: Uuid, data: &TaskComplete) -> Result<Task, ClientError>;
    async fn convert_to_activity(
        &self,
        id: Uuid,
        data: &ConvertToActivity,
    ) -> Result<TaskActivity, ClientError>;
    async fn generate_occurrences(&self, id: Uuid, count: u32) -> Result<Vec<Task>, ClientError>;
    async fn generate_rolling(&self) -> Result<RollingGeneration, ClientError>;
}

#[async_trait]
pub trait TimerApi: Send + Sync {
    async fn start_timer(&self, category_id: Uuid) -> Result<Activity, ClientError>;
    async fn stop_timer(&self) -> Result<Activity, ClientError>;
    async fn stop_timer_at(&self, end_time: &str) -> Result<Activity, ClientError>;
    // `None` when no timer is running.
    async fn active_timer(&self) -> Result<Option<Activity>, ClientError>;
}

#[async_trait]
pub trait InsightsApi: Send + Sync {
    async fn daily_comparison(&self, date: Option<NaiveDate>)
    -> Result<DailyInsight, ClientError>;
    async fn weekly_comparison(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<WeeklyInsight, ClientError>;
}

#[async_trait]
pub trait ConstraintsApi: Send + Sync {
    async fn get_constraints(&self) -> Result<GlobalConstraints, ClientError>;
    async fn update_constraints(
        &self,
        data: &UpdateGlobalConstraints,
    ) -> Result<GlobalConstraints, ClientError>;
}

#[async_trait]
pub trait ImportApi: Send + Sync {
    async fn import_excel(&self, file: ImportFile) -> Result<ImportResponse, ClientError>;
}
