// Period-over-period comparisons computed by the backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validation::{Validate, ValidationIssue, max_items};

const MAX_TOP_CATEGORIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBreakdownItem {
    pub group_id: Uuid,
    pub group_name: String,
    pub group_color: Option<String>,
    pub minutes: f64,
    pub previous_minutes: f64,
    pub minutes_delta: f64,
    pub percent_change: f64,
    pub percent_of_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCategoryItem {
    pub category_id: Uuid,
    pub category_name: String,
    pub group_name: String,
    pub group_color: Option<String>,
    pub minutes: f64,
    pub previous_minutes: f64,
    pub minutes_delta: f64,
    pub percent_change: f64,
    pub percent_of_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityHighlight {
    pub category_name: String,
    pub minutes: f64,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub activities_count: f64,
    pub previous_activities_count: f64,
    pub activities_count_delta: f64,
    pub categories_used: f64,
    pub previous_categories_used: f64,
    pub categories_used_delta: f64,
    pub average_activity_duration: f64,
    pub previous_average_activity_duration: f64,
    pub average_activity_duration_delta: f64,
    #[serde(default)]
    pub longest_activity: Option<ActivityHighlight>,
    #[serde(default)]
    pub shortest_activity: Option<ActivityHighlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Productivity {
    pub mandatory_minutes: f64,
    pub previous_mandatory_minutes: f64,
    pub mandatory_minutes_delta: f64,
    pub mandatory_percent_of_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyInsight {
    pub date: NaiveDate,
    pub previous_date: NaiveDate,
    pub total_minutes: f64,
    pub previous_total_minutes: f64,
    pub total_minutes_delta: f64,
    pub total_minutes_percent_change: f64,
    pub group_breakdown: Vec<GroupBreakdownItem>,
    pub top_categories: Vec<TopCategoryItem>,
    pub stats: DailyStats,
    #[serde(default)]
    pub productivity: Option<Productivity>,
}

impl Validate for DailyInsight {
    fn validate(&self) -> Result<(), ValidationIssue> {
        max_items("topCategories", &self.top_categories, MAX_TOP_CATEGORIES)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBreakdownItem {
    pub date: NaiveDate,
    pub day_name: String,
    pub minutes: f64,
    pub activities_count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductiveDay {
    pub date: NaiveDate,
    pub day_name: String,
    pub minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyActivityHighlight {
    pub category_name: String,
    pub minutes: f64,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub activities_count: f64,
    pub previous_activities_count: f64,
    pub activities_count_delta: f64,
    pub categories_used: f64,
    pub previous_categories_used: f64,
    pub categories_used_delta: f64,
    pub average_activity_duration: f64,
    pub previous_average_activity_duration: f64,
    pub average_activity_duration_delta: f64,
    pub average_daily_minutes: f64,
    pub previous_average_daily_minutes: f64,
    pub average_daily_minutes_delta: f64,
    #[serde(default)]
    pub most_productive_day: Option<ProductiveDay>,
    #[serde(default)]
    pub least_productive_day: Option<ProductiveDay>,
    #[serde(default)]
    pub longest_activity: Option<WeeklyActivityHighlight>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Under,
    OnTrack,
    TargetMet,
    Over,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub category_id: Uuid,
    pub category_name: String,
    pub current_week_minutes: f64,
    pub target_weekly_minutes: f64,
    pub min_weekly_minutes: f64,
    pub max_weekly_minutes: f64,
    pub progress_percent: f64,
    pub status: GoalStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyInsight {
    pub week_start_date: NaiveDate,
    pub week_end_date: NaiveDate,
    pub previous_week_start_date: NaiveDate,
    pub previous_week_end_date: NaiveDate,
    pub total_minutes: f64,
    pub previous_total_minutes: f64,
    pub total_minutes_delta: f64,
    pub total_minutes_percent_change: f64,
    pub group_breakdown: Vec<GroupBreakdownItem>,
    pub top_categories: Vec<TopCategoryItem>,
    pub stats: WeeklyStats,
    pub daily_breakdown: Vec<DailyBreakdownItem>,
    #[serde(default)]
    pub goals_progress: Option<Vec<GoalProgress>>,
}

impl Validate for WeeklyInsight {
    fn validate(&self) -> Result<(), ValidationIssue> {
        max_items("topCategories", &self.top_categories, MAX_TOP_CATEGORIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn top_category(index: usize) -> serde_json::Value {
        json!({
            "categoryId": "c1f0a3b2-1d2e-4f5a-8b9c-0d1e2f3a4b5c",
            "categoryName": format!("Category {index}"),
            "groupName": "Work",
            "groupColor": null,
            "minutes": 60,
            "previousMinutes": 30,
            "minutesDelta": 30,
            "percentChange": 100.0,
            "percentOfTotal": 20.0
        })
    }

    fn daily_payload(top_count: usize) -> serde_json::Value {
        json!({
            "date": "2026-01-25",
            "previousDate": "2026-01-24",
            "totalMinutes": 300,
            "previousTotalMinutes": 240,
            "totalMinutesDelta": 60,
            "totalMinutesPercentChange": 25.0,
            "groupBreakdown": [],
            "topCategories": (0..top_count).map(top_category).collect::<Vec<_>>(),
            "stats": {
                "activitiesCount": 4,
                "previousActivitiesCount": 3,
                "activitiesCountDelta": 1,
                "categoriesUsed": 2,
                "previousCategoriesUsed": 2,
                "categoriesUsedDelta": 0,
                "averageActivityDuration": 75,
                "previousAverageActivityDuration": 80,
                "averageActivityDurationDelta": -5,
                "longestActivity": null
            },
            "productivity": null
        })
    }

    #[test]
    fn when_daily_insight_has_five_top_categories_then_it_is_valid() {
        let insight: DailyInsight =
            serde_json::from_value(daily_payload(5)).expect("insight should decode");

        assert!(insight.validate().is_ok());
        assert_eq!(insight.stats.longest_activity, None);
        assert_eq!(insight.stats.shortest_activity, None);
    }

    #[test]
    fn when_daily_insight_has_six_top_categories_then_validation_fails() {
        let insight: DailyInsight =
            serde_json::from_value(daily_payload(6)).expect("insight should decode");

        let issue = insight.validate().expect_err("six entries should fail");

        assert_eq!(issue.path, "topCategories");
    }

    #[test]
    fn when_goal_status_is_snake_case_then_it_decodes() {
        let status: GoalStatus = serde_json::from_value(json!("target_met")).expect("status");

        assert_eq!(status, GoalStatus::TargetMet);
    }
}
