use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::time::{deserialize_optional_time, deserialize_time};
use crate::domain::validation::{Validate, ValidationIssue, hh_mm, optional_hh_mm};

// A tracked block of time. Times are normalized to HH:mm on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(deserialize_with = "deserialize_time")]
    pub start_time: String,
    // Absent while a timer is still running.
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub end_time: Option<String>,
    pub category_id: Uuid,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Validate for Activity {
    fn validate(&self) -> Result<(), ValidationIssue> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivity {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub category_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for CreateActivity {
    fn validate(&self) -> Result<(), ValidationIssue> {
        hh_mm("startTime", &self.start_time)?;
        hh_mm("endTime", &self.end_time)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivity {
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

impl Validate for UpdateActivity {
    fn validate(&self) -> Result<(), ValidationIssue> {
        optional_hh_mm("startTime", self.start_time.as_deref())?;
        optional_hh_mm("endTime", self.end_time.as_deref())
    }
}
