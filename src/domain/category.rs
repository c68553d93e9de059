use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validation::{Validate, ValidationIssue, at_least, non_empty};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryUnit {
    #[default]
    Hours,
    Minutes,
    Count,
}

// Named bucket of activities with weekly goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub group_id: Uuid,
    pub priority: i64,
    pub min_weekly_hours: f64,
    pub target_weekly_hours: f64,
    pub max_weekly_hours: f64,
    pub unit: CategoryUnit,
    pub mandatory: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Validate for Category {
    fn validate(&self) -> Result<(), ValidationIssue> {
        non_empty("name", &self.name)?;
        at_least("priority", self.priority as f64, 1.0)?;
        at_least("minWeeklyHours", self.min_weekly_hours, 0.0)?;
        at_least("targetWeeklyHours", self.target_weekly_hours, 0.0)?;
        at_least("maxWeeklyHours", self.max_weekly_hours, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    pub name: String,
    pub group_id: Uuid,
    pub priority: i64,
    pub min_weekly_hours: f64,
    pub target_weekly_hours: f64,
    pub max_weekly_hours: f64,
    pub unit: CategoryUnit,
    pub mandatory: bool,
}

impl CreateCategory {
    // Mirrors the backend defaults for everything but the name and group.
    pub fn new(name: impl Into<String>, group_id: Uuid) -> Self {
        Self {
            name: name.into(),
            group_id,
            priority: 1,
            min_weekly_hours: 0.0,
            target_weekly_hours: 0.0,
            max_weekly_hours: 0.0,
            unit: CategoryUnit::Hours,
            mandatory: false,
        }
    }
}

impl Validate for CreateCategory {
    fn validate(&self) -> Result<(), ValidationIssue> {
        non_empty("name", &self.name)?;
        at_least("priority", self.priority as f64, 1.0)?;
        at_least("minWeeklyHours", self.min_weekly_hours, 0.0)?;
        at_least("targetWeeklyHours", self.target_weekly_hours, 0.0)?;
        at_least("maxWeeklyHours", self.max_weekly_hours, 0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_weekly_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weekly_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_weekly_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<CategoryUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandatory: Option<bool>,
}

impl Validate for UpdateCategory {
    fn validate(&self) -> Result<(), ValidationIssue> {
        if let Some(name) = &self.name {
            non_empty("name", name)?;
        }
        if let Some(priority) = self.priority {
            at_least("priority", priority as f64, 1.0)?;
        }
        for (path, hours) in [
            ("minWeeklyHours", self.min_weekly_hours),
            ("targetWeeklyHours", self.target_weekly_hours),
            ("maxWeeklyHours", self.max_weekly_hours),
        ] {
            if let Some(hours) = hours {
                at_least(path, hours, 0.0)?;
            }
        }
        Ok(())
    }
}

// Top-level grouping of categories, usually with a display color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Validate for Group {
    fn validate(&self) -> Result<(), ValidationIssue> {
        non_empty("name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroup {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Validate for CreateGroup {
    fn validate(&self) -> Result<(), ValidationIssue> {
        non_empty("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Validate for UpdateGroup {
    fn validate(&self) -> Result<(), ValidationIssue> {
        match &self.name {
            Some(name) => non_empty("name", name),
            None => Ok(()),
        }
    }
}
