use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::ports::{Clock, TelemetryEvent, TelemetrySink};
use crate::interface_adapters::clock::SystemClock;

const CAPTURE_TIMEOUT: Duration = Duration::from_secs(5);

// Body posted to the ingest endpoint.
#[derive(Debug, Serialize)]
struct EventBody<'a> {
    message: &'a str,
    level: &'static str,
    tags: Map<String, Value>,
    extra: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    release: Option<&'a str>,
    timestamp: u64,
}

// Forwards classified errors to a remote collector as JSON.
#[derive(Clone)]
pub struct RemoteTelemetrySink {
    http: Client,
    dsn: String,
}

impl RemoteTelemetrySink {
    pub fn new(dsn: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            dsn: dsn.into(),
        }
    }

    pub fn dsn(&self) -> &str {
        &self.dsn
    }
}

fn event_body(event: &TelemetryEvent, timestamp: u64) -> EventBody<'_> {
    let tags = event
        .tags
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
    EventBody {
        message: &event.message,
        level: event.level.as_str(),
        tags,
        extra: &event.extra,
        environment: event.environment.as_deref(),
        release: event.release.as_deref(),
        timestamp,
    }
}

#[async_trait]
impl TelemetrySink for RemoteTelemetrySink {
    async fn capture(&self, event: TelemetryEvent) -> Result<(), String> {
        let body = event_body(&event, SystemClock.now_epoch_seconds());
        let res = self
            .http
            .post(&self.dsn)
            .timeout(CAPTURE_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|err| format!("telemetry transport error: {err}"))?;

        let status = res.status();
        if !status.is_success() {
            return Err(format!("telemetry upstream error {status}"));
        }
        Ok(())
    }
}
