use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::time::deserialize_schedule_time;
use crate::domain::validation::{
    Validate, ValidationIssue, hh_mm, non_empty, optional_hh_mm, positive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    pub position: i64,
    #[serde(default)]
    pub task_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Validate for TaskList {
    fn validate(&self) -> Result<(), ValidationIssue> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskList {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub position: i64,
}

impl Validate for CreateTaskList {
    fn validate(&self) -> Result<(), ValidationIssue> {
        non_empty("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl Validate for UpdateTaskList {
    fn validate(&self) -> Result<(), ValidationIssue> {
        match &self.name {
            Some(name) => non_empty("name", name),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub task_list_id: Uuid,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_schedule_time")]
    pub scheduled_start_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_schedule_time")]
    pub scheduled_end_time: Option<String>,
    #[serde(default)]
    pub estimated_duration_minutes: Option<f64>,
    #[serde(default)]
    pub recurrence_rule: Option<String>,
    // The backend sends null for "no exceptions".
    #[serde(default, deserialize_with = "null_as_empty")]
    pub exception_dates: Vec<String>,
    pub position: i64,
    #[serde(default)]
    pub activity_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Validate for Task {
    fn validate(&self) -> Result<(), ValidationIssue> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub task_list_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_dates: Option<Vec<String>>,
    pub position: i64,
}

impl CreateTask {
    pub fn new(task_list_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            task_list_id,
            category_id: None,
            title: title.into(),
            description: None,
            priority: TaskPriority::Medium,
            due_date: None,
            scheduled_date: None,
            scheduled_start_time: None,
            scheduled_end_time: None,
            estimated_duration_minutes: None,
            recurrence_rule: None,
            exception_dates: None,
            position: 0,
        }
    }
}

impl Validate for CreateTask {
    fn validate(&self) -> Result<(), ValidationIssue> {
        non_empty("title", &self.title)?;
        optional_hh_mm("scheduledStartTime", self.scheduled_start_time.as_deref())?;
        optional_hh_mm("scheduledEndTime", self.scheduled_end_time.as_deref())?;
        if let Some(minutes) = self.estimated_duration_minutes {
            positive("estimatedDurationMinutes", minutes)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_list_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_dates: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl Validate for UpdateTask {
    fn validate(&self) -> Result<(), ValidationIssue> {
        if let Some(title) = &self.title {
            non_empty("title", title)?;
        }
        optional_hh_mm("scheduledStartTime", self.scheduled_start_time.as_deref())?;
        optional_hh_mm("scheduledEndTime", self.scheduled_end_time.as_deref())?;
        if let Some(minutes) = self.estimated_duration_minutes {
            positive("estimatedDurationMinutes", minutes)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskComplete {
    pub add_to_tracker: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for TaskComplete {
    fn validate(&self) -> Result<(), ValidationIssue> {
        optional_hh_mm("startTime", self.start_time.as_deref())?;
        optional_hh_mm("endTime", self.end_time.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertToActivity {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for ConvertToActivity {
    fn validate(&self) -> Result<(), ValidationIssue> {
        hh_mm("startTime", &self.start_time)?;
        hh_mm("endTime", &self.end_time)
    }
}

// Link row created when a task is logged as an activity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskActivity {
    pub id: Uuid,
    pub task_id: Uuid,
    pub activity_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Validate for TaskActivity {
    fn validate(&self) -> Result<(), ValidationIssue> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingGeneration {
    pub created_count: u32,
    pub recurring_tasks_checked: u32,
}

impl Validate for RollingGeneration {
    fn validate(&self) -> Result<(), ValidationIssue> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub list_id: Option<Uuid>,
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    // Query pairs keep the backend's snake_case names.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(list_id) = self.list_id {
            pairs.push(("list_id".to_string(), list_id.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn when_task_has_null_collections_then_defaults_apply() {
        let payload = json!({
            "id": "0d6f5a3e-2f4b-4a8e-9c71-5d3b2a1e0f99",
            "taskListId": "c1f0a3b2-1d2e-4f5a-8b9c-0d1e2f3a4b5c",
            "title": "Write report",
            "status": "in_progress",
            "priority": "urgent",
            "scheduledStartTime": "08:30:00",
            "scheduledEndTime": "",
            "exceptionDates": null,
            "position": 3,
            "createdAt": "2026-01-25T09:00:00Z",
            "updatedAt": "2026-01-25T09:00:00Z"
        });

        let task: Task = serde_json::from_value(payload).expect("task should decode");

        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::Urgent);
        assert_eq!(task.scheduled_start_time.as_deref(), Some("08:30"));
        assert_eq!(task.scheduled_end_time, None);
        assert!(task.exception_dates.is_empty());
        assert!(task.activity_ids.is_empty());
    }

    #[test]
    fn when_duration_is_zero_then_create_task_is_rejected() {
        let mut task = CreateTask::new(Uuid::nil(), "Plan week");
        task.estimated_duration_minutes = Some(0.0);

        let issue = task.validate().expect_err("zero duration should fail");

        assert_eq!(issue.path, "estimatedDurationMinutes");
    }

    #[test]
    fn when_filter_is_set_then_query_uses_snake_case_names() {
        let filter = TaskFilter {
            list_id: Some(Uuid::nil()),
            status: Some(TaskStatus::InProgress),
        };

        let pairs = filter.query_pairs();

        assert_eq!(pairs[0].0, "list_id");
        assert_eq!(pairs[1], ("status".to_string(), "in_progress".to_string()));
    }
}
