use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::activity::{Activity, CreateActivity, UpdateActivity};
use crate::domain::auth::{
    ActiveSessions, LoginResponse, LogoutAllResponse, MeResponse, User,
};
use crate::domain::category::{
    Category, CategoryUnit, CreateCategory, CreateGroup, Group, UpdateCategory, UpdateGroup,
};
use crate::domain::constraints::{GlobalConstraints, UpdateGlobalConstraints};
use crate::domain::failure::ClientError;
use crate::domain::insights::{DailyInsight, DailyStats, WeeklyInsight};
use crate::domain::ports::{
    ActivitiesApi, AuthApi, CategoriesApi, Clock, ConstraintsApi, GroupsApi, InsightsApi,
    Navigator, SessionRefresher, TasksApi, TelemetryEvent, TelemetrySink, TimerApi, ToastSurface,
    Translator,
};
use crate::domain::task::{
    ConvertToActivity, CreateTask, CreateTaskList, RollingGeneration, Task, TaskActivity,
    TaskComplete, TaskFilter, TaskList, TaskPriority, TaskStatus, UpdateTask, UpdateTaskList,
};
use crate::domain::toast::ToastPayload;
use crate::interface_adapters::storage::InMemoryKeyValueStore;
use crate::use_cases::error_handler::ErrorHandler;
use crate::use_cases::error_logger::{ErrorLogger, ErrorLoggerConfig};
use crate::use_cases::session::CredentialVault;
use crate::use_cases::toaster::Toaster;

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_seconds(&self) -> u64 {
        self.0
    }
}

pub(crate) fn fixed_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_769_340_000, 0).unwrap_or_default()
}

pub(crate) fn sample_user() -> User {
    User {
        id: Uuid::from_u128(0x5a5a_0001),
        email: "ana@example.com".to_string(),
        name: "Ana".to_string(),
        created_at: None,
    }
}

pub(crate) fn sample_activity(date: NaiveDate, start: &str, end: Option<&str>) -> Activity {
    Activity {
        id: Uuid::new_v4(),
        date,
        start_time: start.to_string(),
        end_time: end.map(str::to_string),
        category_id: Uuid::from_u128(0xc0de),
        notes: None,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub(crate) fn sample_group(name: &str) -> Group {
    Group {
        id: Uuid::new_v4(),
        name: name.to_string(),
        color: None,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub(crate) fn sample_category(name: &str, group_id: Uuid) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        group_id,
        priority: 1,
        min_weekly_hours: 0.0,
        target_weekly_hours: 5.0,
        max_weekly_hours: 10.0,
        unit: CategoryUnit::Hours,
        mandatory: false,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub(crate) fn sample_task_list(name: &str) -> TaskList {
    TaskList {
        id: Uuid::new_v4(),
        name: name.to_string(),
        color: None,
        icon: None,
        position: 0,
        task_count: 0,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub(crate) fn sample_task(list_id: Uuid, title: &str, scheduled: Option<NaiveDate>) -> Task {
    Task {
        id: Uuid::new_v4(),
        task_list_id: list_id,
        category_id: None,
        title: title.to_string(),
        description: None,
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        due_date: None,
        scheduled_date: scheduled,
        scheduled_start_time: None,
        scheduled_end_time: None,
        estimated_duration_minutes: None,
        recurrence_rule: None,
        exception_dates: Vec::new(),
        position: 0,
        activity_ids: Vec::new(),
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub(crate) fn sample_constraints() -> GlobalConstraints {
    GlobalConstraints {
        id: Uuid::from_u128(0xc0),
        total_weekly_hours: 168.0,
        min_sleep_hours: 56.0,
        underutilization_threshold: 0.8,
        overutilization_threshold: 1.2,
        wasted_time_threshold: 2.0,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub(crate) fn sample_daily_insight(date: NaiveDate) -> DailyInsight {
    DailyInsight {
        date,
        previous_date: date.pred_opt().unwrap_or(date),
        total_minutes: 300.0,
        previous_total_minutes: 240.0,
        total_minutes_delta: 60.0,
        total_minutes_percent_change: 25.0,
        group_breakdown: Vec::new(),
        top_categories: Vec::new(),
        stats: DailyStats {
            activities_count: 4.0,
            previous_activities_count: 3.0,
            activities_count_delta: 1.0,
            categories_used: 2.0,
            previous_categories_used: 2.0,
            categories_used_delta: 0.0,
            average_activity_duration: 75.0,
            previous_average_activity_duration: 80.0,
            average_activity_duration_delta: -5.0,
            longest_activity: None,
            shortest_activity: None,
        },
        productivity: None,
    }
}

#[derive(Default)]
pub(crate) struct RecordingSurface {
    payloads: Mutex<Vec<ToastPayload>>,
    removed: Mutex<Vec<String>>,
}

impl RecordingSurface {
    pub(crate) fn payloads(&self) -> Vec<ToastPayload> {
        self.payloads.lock().expect("toasts mutex poisoned").clone()
    }

    pub(crate) fn removed(&self) -> Vec<String> {
        self.removed.lock().expect("toasts mutex poisoned").clone()
    }
}

impl ToastSurface for RecordingSurface {
    fn add_toast(&self, payload: ToastPayload) -> String {
        let mut guard = self.payloads.lock().expect("toasts mutex poisoned");
        guard.push(payload);
        format!("toast-{}", guard.len())
    }

    fn remove_toast(&self, id: &str) {
        let mut guard = self.removed.lock().expect("toasts mutex poisoned");
        guard.push(id.to_string());
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    calls: AtomicUsize,
}

impl RecordingNavigator {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to_login(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

// Marks translated text so tests can tell it apart from literal messages.
pub(crate) struct BracketTranslator;

impl Translator for BracketTranslator {
    fn translate(&self, key: &str) -> String {
        format!("[{key}]")
    }
}

#[derive(Default)]
pub(crate) struct RecordingTelemetry {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingTelemetry {
    pub(crate) fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().expect("events mutex poisoned").clone()
    }
}

#[async_trait]
impl TelemetrySink for RecordingTelemetry {
    async fn capture(&self, event: TelemetryEvent) -> Result<(), String> {
        self.events.lock().expect("events mutex poisoned").push(event);
        Ok(())
    }
}

// Collects formatted log output for assertions.
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub(crate) fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + use<> {
        let writer = self.clone();
        tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_target(false)
            .finish()
    }

    pub(crate) fn contents(&self) -> String {
        let guard = self.buffer.lock().expect("logs mutex poisoned");
        String::from_utf8_lossy(&guard).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .expect("logs mutex poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// Error handler wired to recording fakes.
pub(crate) struct HandlerHarness {
    pub(crate) handler: Arc<ErrorHandler>,
    pub(crate) surface: Arc<RecordingSurface>,
    pub(crate) navigator: Arc<RecordingNavigator>,
}

impl HandlerHarness {
    pub(crate) fn new() -> Self {
        let surface = Arc::new(RecordingSurface::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let toaster = Arc::new(Toaster::new());
        toaster.register(surface.clone());
        let handler = Arc::new(ErrorHandler::new(
            Arc::new(ErrorLogger::new(ErrorLoggerConfig::default())),
            toaster,
            Arc::new(BracketTranslator),
            navigator.clone(),
        ));
        Self {
            handler,
            surface,
            navigator,
        }
    }
}

pub(crate) async fn empty_vault() -> Arc<CredentialVault> {
    let store = Arc::new(InMemoryKeyValueStore::new());
    Arc::new(CredentialVault::load(store).await.expect("load vault"))
}

// Refresher that issues the next token from a queue and counts calls.
pub(crate) struct CountingRefresher {
    vault: Arc<CredentialVault>,
    next: Mutex<Option<Result<String, ClientError>>>,
    calls: AtomicUsize,
}

impl CountingRefresher {
    pub(crate) fn new(vault: Arc<CredentialVault>, next: Result<String, ClientError>) -> Self {
        Self {
            vault,
            next: Mutex::new(Some(next)),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionRefresher for CountingRefresher {
    async fn refresh_session(&self) -> Result<String, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .next
            .lock()
            .expect("refresher mutex poisoned")
            .take()
            .unwrap_or_else(|| Err(ClientError::Other("no token queued".to_string())));
        let token = next?;
        self.vault.set_token(token.clone()).await?;
        Ok(token)
    }
}

// Never answers its first call; later calls succeed without touching the vault.
#[derive(Default)]
pub(crate) struct StallingRefresher {
    calls: AtomicUsize,
}

impl StallingRefresher {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionRefresher for StallingRefresher {
    async fn refresh_session(&self) -> Result<String, ClientError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            std::future::pending::<()>().await;
        }
        Ok("renewed-token".to_string())
    }
}

#[derive(Default)]
struct BackendData {
    activities: Vec<Activity>,
    categories: Vec<Category>,
    groups: Vec<Group>,
    task_lists: Vec<TaskList>,
    tasks: Vec<Task>,
    active_timer: Option<Activity>,
    daily: Option<DailyInsight>,
    weekly: Option<WeeklyInsight>,
    constraints: Option<GlobalConstraints>,
}

// In-memory stand-in for every resource API, with a switchable failure.
#[derive(Default)]
pub(crate) struct FakeBackend {
    data: Mutex<BackendData>,
    failure: Mutex<Option<ClientError>>,
    calls: Mutex<Vec<String>>,
}

fn not_found() -> ClientError {
    ClientError::http(404, None)
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_with(&self, error: ClientError) {
        *self.failure.lock().expect("backend mutex poisoned") = Some(error);
    }

    pub(crate) fn recover(&self) {
        *self.failure.lock().expect("backend mutex poisoned") = None;
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("backend mutex poisoned").clone()
    }

    pub(crate) fn seed_activities(&self, activities: Vec<Activity>) {
        self.data().activities = activities;
    }

    pub(crate) fn seed_categories(&self, categories: Vec<Category>) {
        self.data().categories = categories;
    }

    pub(crate) fn seed_groups(&self, groups: Vec<Group>) {
        self.data().groups = groups;
    }

    pub(crate) fn seed_task_lists(&self, lists: Vec<TaskList>) {
        self.data().task_lists = lists;
    }

    pub(crate) fn seed_tasks(&self, tasks: Vec<Task>) {
        self.data().tasks = tasks;
    }

    pub(crate) fn seed_active_timer(&self, activity: Option<Activity>) {
        self.data().active_timer = activity;
    }

    pub(crate) fn seed_daily(&self, insight: DailyInsight) {
        self.data().daily = Some(insight);
    }

    pub(crate) fn seed_constraints(&self, constraints: GlobalConstraints) {
        self.data().constraints = Some(constraints);
    }

    fn data(&self) -> std::sync::MutexGuard<'_, BackendData> {
        self.data.lock().expect("backend mutex poisoned")
    }

    fn enter(&self, call: &str) -> Result<(), ClientError> {
        self.calls
            .lock()
            .expect("backend mutex poisoned")
            .push(call.to_string());
        match self.failure.lock().expect("backend mutex poisoned").clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AuthApi for FakeBackend {
    async fn login_with_google(&self, google_token: &str) -> Result<LoginResponse, ClientError> {
        self.enter("login_with_google")?;
        Ok(LoginResponse {
            access_token: format!("access-for-{google_token}"),
            refresh_token: None,
            user: sample_user(),
        })
    }

    async fn me(&self) -> Result<MeResponse, ClientError> {
        self.enter("me")?;
        Ok(MeResponse {
            user: sample_user(),
        })
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.enter("logout")
    }

    async fn logout_all(&self) -> Result<LogoutAllResponse, ClientError> {
        self.enter("logout_all")?;
        Ok(LogoutAllResponse {
            message: "Logged out from all devices".to_string(),
            revoked_count: 2,
        })
    }

    async fn active_sessions(&self) -> Result<ActiveSessions, ClientError> {
        self.enter("active_sessions")?;
        Ok(ActiveSessions {
            sessions: Vec::new(),
            total: 0,
        })
    }
}

#[async_trait]
impl ActivitiesApi for FakeBackend {
    async fn list_activities(&self) -> Result<Vec<Activity>, ClientError> {
        self.enter("list_activities")?;
        Ok(self.data().activities.clone())
    }

    async fn list_activities_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Activity>, ClientError> {
        self.enter("list_activities_by_date")?;
        let data = self.data();
        Ok(data
            .activities
            .iter()
            .filter(|activity| activity.date == date)
            .cloned()
            .collect())
    }

    async fn get_activity(&self, id: Uuid) -> Result<Activity, ClientError> {
        self.enter("get_activity")?;
        let data = self.data();
        data.activities
            .iter()
            .find(|activity| activity.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_activity(&self, data: &CreateActivity) -> Result<Activity, ClientError> {
        self.enter("create_activity")?;
        let mut activity = sample_activity(data.date, &data.start_time, Some(&data.end_time));
        activity.category_id = data.category_id;
        activity.notes = data.notes.clone();
        self.data().activities.push(activity.clone());
        Ok(activity)
    }

    async fn update_activity(
        &self,
        id: Uuid,
        update: &UpdateActivity,
    ) -> Result<Activity, ClientError> {
        self.enter("update_activity")?;
        let mut data = self.data();
        let activity = data
            .activities
            .iter_mut()
            .find(|activity| activity.id == id)
            .ok_or_else(not_found)?;
        if let Some(start_time) = &update.start_time {
            activity.start_time = start_time.clone();
        }
        if let Some(end_time) = &update.end_time {
            activity.end_time = Some(end_time.clone());
        }
        if let Some(notes) = &update.notes {
            activity.notes = Some(notes.clone());
        }
        Ok(activity.clone())
    }

    async fn delete_activity(&self, id: Uuid) -> Result<(), ClientError> {
        self.enter("delete_activity")?;
        self.data().activities.retain(|activity| activity.id != id);
        Ok(())
    }
}

#[async_trait]
impl CategoriesApi for FakeBackend {
    async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.enter("list_categories")?;
        Ok(self.data().categories.clone())
    }

    async fn get_category(&self, id: Uuid) -> Result<Category, ClientError> {
        self.enter("get_category")?;
        let data = self.data();
        data.categories
            .iter()
            .find(|category| category.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_category(&self, data: &CreateCategory) -> Result<Category, ClientError> {
        self.enter("create_category")?;
        let mut category = sample_category(&data.name, data.group_id);
        category.priority = data.priority;
        self.data().categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: Uuid,
        update: &UpdateCategory,
    ) -> Result<Category, ClientError> {
        self.enter("update_category")?;
        let mut data = self.data();
        let category = data
            .categories
            .iter_mut()
            .find(|category| category.id == id)
            .ok_or_else(not_found)?;
        if let Some(name) = &update.name {
            category.name = name.clone();
        }
        if let Some(priority) = update.priority {
            category.priority = priority;
        }
        Ok(category.clone())
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), ClientError> {
        self.enter("delete_category")?;
        self.data().categories.retain(|category| category.id != id);
        Ok(())
    }
}

#[async_trait]
impl GroupsApi for FakeBackend {
    async fn list_groups(&self) -> Result<Vec<Group>, ClientError> {
        self.enter("list_groups")?;
        Ok(self.data().groups.clone())
    }

    async fn get_group(&self, id: Uuid) -> Result<Group, ClientError> {
        self.enter("get_group")?;
        let data = self.data();
        data.groups
            .iter()
            .find(|group| group.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_group(&self, data: &CreateGroup) -> Result<Group, ClientError> {
        self.enter("create_group")?;
        let mut group = sample_group(&data.name);
        group.color = data.color.clone();
        self.data().groups.push(group.clone());
        Ok(group)
    }

    async fn update_group(&self, id: Uuid, update: &UpdateGroup) -> Result<Group, ClientError> {
        self.enter("update_group")?;
        let mut data = self.data();
        let group = data
            .groups
            .iter_mut()
            .find(|group| group.id == id)
            .ok_or_else(not_found)?;
        if let Some(name) = &update.name {
            group.name = name.clone();
        }
        if let Some(color) = &update.color {
            group.color = Some(color.clone());
        }
        Ok(group.clone())
    }

    async fn delete_group(&self, id: Uuid) -> Result<(), ClientError> {
        self.enter("delete_group")?;
        self.data().groups.retain(|group| group.id != id);
        Ok(())
    }
}

#[async_trait]
impl TasksApi for FakeBackend {
    async fn list_task_lists(&self) -> Result<Vec<TaskList>, ClientError> {
        self.enter("list_task_lists")?;
        Ok(self.data().task_lists.clone())
    }

    async fn create_task_list(&self, data: &CreateTaskList) -> Result<TaskList, ClientError> {
        self.enter("create_task_list")?;
        let mut list = sample_task_list(&data.name);
        list.position = data.position;
        self.data().task_lists.push(list.clone());
        Ok(list)
    }

    async fn update_task_list(
        &self,
        id: Uuid,
        update: &UpdateTaskList,
    ) -> Result<TaskList, ClientError> {
        self.enter("update_task_list")?;
        let mut data = self.data();
        let list = data
            .task_lists
            .iter_mut()
            .find(|list| list.id == id)
            .ok_or_else(not_found)?;
        if let Some(name) = &update.name {
            list.name = name.clone();
        }
        Ok(list.clone())
    }

    async fn delete_task_list(&self, id: Uuid) -> Result<(), ClientError> {
        self.enter("delete_task_list")?;
        let mut data = self.data();
        data.task_lists.retain(|list| list.id != id);
        data.tasks.retain(|task| task.task_list_id != id);
        Ok(())
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ClientError> {
        self.enter("list_tasks")?;
        let data = self.data();
        Ok(data
            .tasks
            .iter()
            .filter(|task| filter.list_id.is_none_or(|id| task.task_list_id == id))
            .filter(|task| filter.status.is_none_or(|status| task.status == status))
            .cloned()
            .collect())
    }

    async fn get_task(&self, id: Uuid) -> Result<Task, ClientError> {
        self.enter("get_task")?;
        let data = self.data();
        data.tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_task(&self, data: &CreateTask) -> Result<Task, ClientError> {
        self.enter("create_task")?;
        let mut task = sample_task(data.task_list_id, &data.title, data.scheduled_date);
        task.priority = data.priority;
        self.data().tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: Uuid, update: &UpdateTask) -> Result<Task, ClientError> {
        self.enter("update_task")?;
        let mut data = self.data();
        let task = data
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(not_found)?;
        if let Some(title) = &update.title {
            task.title = title.clone();
        }
        if let Some(status) = update.status {
            task.status = status;
        }
        if let Some(scheduled_date) = update.scheduled_date {
            task.scheduled_date = Some(scheduled_date);
        }
        Ok(task.clone())
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), ClientError> {
        self.enter("delete_task")?;
        self.data().tasks.retain(|task| task.id != id);
        Ok(())
    }

    async fn complete_task(&self, id: Uuid, _data: &TaskComplete) -> Result<Task, ClientError> {
        self.enter("complete_task")?;
        let mut data = self.data();
        let task = data
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(not_found)?;
        task.status = TaskStatus::Done;
        Ok(task.clone())
    }

    async fn convert_to_activity(
        &self,
        id: Uuid,
        _data: &ConvertToActivity,
    ) -> Result<TaskActivity, ClientError> {
        self.enter("convert_to_activity")?;
        Ok(TaskActivity {
            id: Uuid::new_v4(),
            task_id: id,
            activity_id: Uuid::new_v4(),
            created_at: fixed_time(),
        })
    }

    async fn generate_occurrences(&self, id: Uuid, count: u32) -> Result<Vec<Task>, ClientError> {
        self.enter("generate_occurrences")?;
        let mut data = self.data();
        let template = data
            .tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or_else(not_found)?;
        let generated: Vec<Task> = (0..count)
            .map(|_| Task {
                id: Uuid::new_v4(),
                recurrence_rule: None,
                ..template.clone()
            })
            .collect();
        data.tasks.extend(generated.iter().cloned());
        Ok(generated)
    }

    async fn generate_rolling(&self) -> Result<RollingGeneration, ClientError> {
        self.enter("generate_rolling")?;
        let checked = self
            .data()
            .tasks
            .iter()
            .filter(|task| task.recurrence_rule.is_some())
            .count();
        Ok(RollingGeneration {
            created_count: 0,
            recurring_tasks_checked: u32::try_from(checked).unwrap_or(u32::MAX),
        })
    }
}

#[async_trait]
impl TimerApi for FakeBackend {
    async fn start_timer(&self, category_id: Uuid) -> Result<Activity, ClientError> {
        self.enter("start_timer")?;
        let date = fixed_time().date_naive();
        let mut activity = sample_activity(date, "09:00", None);
        activity.category_id = category_id;
        self.data().active_timer = Some(activity.clone());
        Ok(activity)
    }

    async fn stop_timer(&self) -> Result<Activity, ClientError> {
        self.enter("stop_timer")?;
        let mut activity = self.data().active_timer.take().ok_or_else(not_found)?;
        activity.end_time = Some("10:00".to_string());
        Ok(activity)
    }

    async fn stop_timer_at(&self, end_time: &str) -> Result<Activity, ClientError> {
        self.enter("stop_timer_at")?;
        let mut activity = self.data().active_timer.take().ok_or_else(not_found)?;
        activity.end_time = Some(end_time.to_string());
        Ok(activity)
    }

    async fn active_timer(&self) -> Result<Option<Activity>, ClientError> {
        self.enter("active_timer")?;
        Ok(self.data().active_timer.clone())
    }
}

#[async_trait]
impl InsightsApi for FakeBackend {
    async fn daily_comparison(
        &self,
        _date: Option<NaiveDate>,
    ) -> Result<DailyInsight, ClientError> {
        self.enter("daily_comparison")?;
        self.data().daily.clone().ok_or_else(not_found)
    }

    async fn weekly_comparison(
        &self,
        _date: Option<NaiveDate>,
    ) -> Result<WeeklyInsight, ClientError> {
        self.enter("weekly_comparison")?;
        self.data().weekly.clone().ok_or_else(not_found)
    }
}

#[async_trait]
impl ConstraintsApi for FakeBackend {
    async fn get_constraints(&self) -> Result<GlobalConstraints, ClientError> {
        self.enter("get_constraints")?;
        self.data().constraints.clone().ok_or_else(not_found)
    }

    async fn update_constraints(
        &self,
        update: &UpdateGlobalConstraints,
    ) -> Result<GlobalConstraints, ClientError> {
        self.enter("update_constraints")?;
        let mut data = self.data();
        let constraints = data.constraints.as_mut().ok_or_else(not_found)?;
        if let Some(total) = update.total_weekly_hours {
            constraints.total_weekly_hours = total;
        }
        if let Some(sleep) = update.min_sleep_hours {
            constraints.min_sleep_hours = sleep;
        }
        Ok(constraints.clone())
    }
}
