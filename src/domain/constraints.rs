use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validation::{Validate, ValidationIssue, at_least, at_most};

fn default_total_weekly_hours() -> f64 {
    168.0
}

fn default_min_sleep_hours() -> f64 {
    56.0
}

fn default_underutilization_threshold() -> f64 {
    0.8
}

fn default_overutilization_threshold() -> f64 {
    1.2
}

fn default_wasted_time_threshold() -> f64 {
    2.0
}

// Per-user weekly planning limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConstraints {
    pub id: Uuid,
    #[serde(default = "default_total_weekly_hours")]
    pub total_weekly_hours: f64,
    #[serde(default = "default_min_sleep_hours")]
    pub min_sleep_hours: f64,
    #[serde(default = "default_underutilization_threshold")]
    pub underutilization_threshold: f64,
    #[serde(default = "default_overutilization_threshold")]
    pub overutilization_threshold: f64,
    #[serde(default = "default_wasted_time_threshold")]
    pub wasted_time_threshold: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Validate for GlobalConstraints {
    fn validate(&self) -> Result<(), ValidationIssue> {
        check_bounds(
            Some(self.total_weekly_hours),
            Some(self.min_sleep_hours),
            Some(self.underutilization_threshold),
            Some(self.overutilization_threshold),
            Some(self.wasted_time_threshold),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGlobalConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_weekly_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_sleep_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underutilization_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overutilization_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wasted_time_threshold: Option<f64>,
}

impl Validate for UpdateGlobalConstraints {
    fn validate(&self) -> Result<(), ValidationIssue> {
        check_bounds(
            self.total_weekly_hours,
            self.min_sleep_hours,
            self.underutilization_threshold,
            self.overutilization_threshold,
            self.wasted_time_threshold,
        )
    }
}

fn check_bounds(
    total_weekly_hours: Option<f64>,
    min_sleep_hours: Option<f64>,
    underutilization_threshold: Option<f64>,
    overutilization_threshold: Option<f64>,
    wasted_time_threshold: Option<f64>,
) -> Result<(), ValidationIssue> {
    if let Some(value) = total_weekly_hours {
        at_least("totalWeeklyHours", value, 0.0)?;
    }
    if let Some(value) = min_sleep_hours {
        at_least("minSleepHours", value, 0.0)?;
    }
    if let Some(value) = underutilization_threshold {
        at_least("underutilizationThreshold", value, 0.0)?;
        at_most("underutilizationThreshold", value, 1.0)?;
    }
    if let Some(value) = overutilization_threshold {
        at_least("overutilizationThreshold", value, 1.0)?;
    }
    if let Some(value) = wasted_time_threshold {
        at_least("wastedTimeThreshold", value, 0.0)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn when_fields_are_missing_then_defaults_fill_in() {
        let constraints: GlobalConstraints = serde_json::from_value(json!({
            "id": "0d6f5a3e-2f4b-4a8e-9c71-5d3b2a1e0f99",
            "createdAt": "2026-01-25T09:00:00Z",
            "updatedAt": "2026-01-25T09:00:00Z"
        }))
        .expect("constraints should decode");

        assert_eq!(constraints.total_weekly_hours, 168.0);
        assert_eq!(constraints.min_sleep_hours, 56.0);
        assert_eq!(constraints.underutilization_threshold, 0.8);
        assert_eq!(constraints.overutilization_threshold, 1.2);
        assert_eq!(constraints.wasted_time_threshold, 2.0);
        assert!(constraints.validate().is_ok());
    }

    #[test]
    fn when_overutilization_is_below_one_then_update_is_rejected() {
        let update = UpdateGlobalConstraints {
            overutilization_threshold: Some(0.9),
            ..Default::default()
        };

        let issue = update.validate().expect_err("threshold below 1 should fail");

        assert_eq!(issue.path, "overutilizationThreshold");
    }

    #[test]
    fn when_underutilization_exceeds_one_then_update_is_rejected() {
        let update = UpdateGlobalConstraints {
            underutilization_threshold: Some(1.1),
            ..Default::default()
        };

        assert!(update.validate().is_err());
    }
}
