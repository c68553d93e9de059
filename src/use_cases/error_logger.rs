// Records classified errors. Output always goes through tracing; a remote
// telemetry sink receives them too once enabled and initialized.

use std::sync::{Arc, PoisonError, RwLock};

use serde_json::{Map, Value};

use crate::domain::errors::{AppError, ErrorSeverity};
use crate::domain::ports::{TelemetryEvent, TelemetryLevel, TelemetrySink};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorLoggerConfig {
    pub enabled: bool,
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub release: Option<String>,
}

/// Partial update for [`ErrorLoggerConfig`]; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ErrorLoggerPatch {
    pub enabled: Option<bool>,
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub release: Option<String>,
}

pub fn telemetry_level(severity: ErrorSeverity) -> TelemetryLevel {
    match severity {
        ErrorSeverity::Critical => TelemetryLevel::Fatal,
        ErrorSeverity::High => TelemetryLevel::Error,
        ErrorSeverity::Medium => TelemetryLevel::Warning,
        ErrorSeverity::Low => TelemetryLevel::Info,
    }
}

pub struct ErrorLogger {
    config: RwLock<ErrorLoggerConfig>,
    sink: RwLock<Option<Arc<dyn TelemetrySink>>>,
}

impl ErrorLogger {
    pub fn new(config: ErrorLoggerConfig) -> Self {
        Self {
            config: RwLock::new(config),
            sink: RwLock::new(None),
        }
    }

    pub fn configure(&self, patch: ErrorLoggerPatch) {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(enabled) = patch.enabled {
            config.enabled = enabled;
        }
        if patch.dsn.is_some() {
            config.dsn = patch.dsn;
        }
        if patch.environment.is_some() {
            config.environment = patch.environment;
        }
        if patch.release.is_some() {
            config.release = patch.release;
        }
    }

    pub fn config(&self) -> ErrorLoggerConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installs the remote sink. Ignored without a DSN or when one is already installed.
    pub fn init_telemetry(&self, sink: Arc<dyn TelemetrySink>) -> bool {
        if self.config().dsn.is_none() {
            return false;
        }
        let mut current = self.sink.write().unwrap_or_else(PoisonError::into_inner);
        if current.is_some() {
            return false;
        }
        *current = Some(sink);
        true
    }

    fn sink(&self) -> Option<Arc<dyn TelemetrySink>> {
        self.sink
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn log_error(&self, error: &AppError, context: Option<&str>) {
        let context = context.unwrap_or_default();
        match error.severity() {
            ErrorSeverity::Critical | ErrorSeverity::High => tracing::error!(
                code = error.code(),
                category = %error.category(),
                severity = %error.severity(),
                status = error.status_code(),
                context,
                "{}",
                error.message()
            ),
            ErrorSeverity::Medium => tracing::warn!(
                code = error.code(),
                category = %error.category(),
                status = error.status_code(),
                context,
                "{}",
                error.message()
            ),
            ErrorSeverity::Low => tracing::info!(
                code = error.code(),
                category = %error.category(),
                field = error.field(),
                context,
                "{}",
                error.message()
            ),
        }

        let config = self.config();
        if !config.enabled {
            return;
        }
        let Some(sink) = self.sink() else {
            return;
        };

        let mut extra = Map::new();
        if !context.is_empty() {
            extra.insert("context".to_string(), Value::String(context.to_string()));
        }
        if let Some(metadata) = error.metadata() {
            extra.extend(metadata.clone());
        }
        let event = TelemetryEvent {
            message: error.message().to_string(),
            level: telemetry_level(error.severity()),
            tags: vec![
                ("category".to_string(), error.category().to_string()),
                ("severity".to_string(), error.severity().to_string()),
                ("code".to_string(), error.code().to_string()),
            ],
            extra,
            environment: config.environment,
            release: config.release,
        };
        if let Err(err) = sink.capture(event).await {
            tracing::warn!(error = %err, "failed to forward error to telemetry");
        }
    }

    pub fn log_info(&self, message: &str, context: Option<&Value>) {
        tracing::info!(context = ?context, "{message}");
    }

    pub fn log_warning(&self, message: &str, context: Option<&Value>) {
        tracing::warn!(context = ?context, "{message}");
    }
}
