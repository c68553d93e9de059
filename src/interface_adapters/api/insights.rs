use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::failure::ClientError;
use crate::domain::insights::{DailyInsight, WeeklyInsight};
use crate::domain::ports::InsightsApi;
use crate::interface_adapters::clients::{ApiClient, ApiRequest};

fn comparison(path: &str, date: Option<NaiveDate>) -> ApiRequest {
    let request = ApiRequest::get(path);
    match date {
        Some(date) => request.query("date", date),
        None => request,
    }
}

#[async_trait]
impl InsightsApi for ApiClient {
    async fn daily_comparison(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<DailyInsight, ClientError> {
        self.send(comparison("api/v1/insights/daily-comparison", date))
            .await
    }

    async fn weekly_comparison(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<WeeklyInsight, ClientError> {
        self.send(comparison("api/v1/insights/weekly-comparison", date))
            .await
    }
}
