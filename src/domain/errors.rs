// Closed error taxonomy shared by every layer that reports failures.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Message keys resolved through the localization layer.
pub mod message_keys {
    pub const NETWORK_TIMEOUT: &str = "errors.network.timeout";
    pub const NETWORK_OFFLINE: &str = "errors.network.offline";
    pub const NETWORK_GENERIC: &str = "errors.network.generic";
    pub const AUTH_SESSION_EXPIRED: &str = "errors.auth.sessionExpired";
    pub const AUTH_UNAUTHORIZED: &str = "errors.auth.unauthorized";
    pub const VALIDATION_GENERIC: &str = "errors.validation.generic";
    pub const NOT_FOUND_RESOURCE: &str = "errors.notFound.resource";
    pub const SERVER_INTERNAL: &str = "errors.server.internal";
    pub const SERVER_GENERIC: &str = "errors.server.generic";
    pub const UNKNOWN_GENERIC: &str = "errors.unknown.generic";
    // Literal copy, shown without translation.
    pub const RATE_LIMITED: &str = "Too many requests. Please wait a moment and try again.";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    Network,
    Auth,
    Validation,
    NotFound,
    Permission,
    Server,
    Client,
    Unknown,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "NETWORK",
            ErrorCategory::Auth => "AUTH",
            ErrorCategory::Validation => "VALIDATION",
            ErrorCategory::NotFound => "NOT_FOUND",
            ErrorCategory::Permission => "PERMISSION",
            ErrorCategory::Server => "SERVER",
            ErrorCategory::Client => "CLIENT",
            ErrorCategory::Unknown => "UNKNOWN",
        }
    }

    // Lowercase segment used to build `errors.<segment>.title` keys.
    pub fn key_segment(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Validation => "validation",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Permission => "permission",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSeverity::Low => "LOW",
            ErrorSeverity::Medium => "MEDIUM",
            ErrorSeverity::High => "HIGH",
            ErrorSeverity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user is expected to do about a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorAction {
    Retry,
    Login,
    ContactSupport,
    Dismiss,
}

/// Construction input for [`AppError`].
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub code: String,
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub message: String,
    pub user_message: String,
    pub status_code: Option<u16>,
    pub field: Option<String>,
    pub retry: bool,
    pub action: Option<ErrorAction>,
    pub metadata: Option<Map<String, Value>>,
}

/// A classified failure. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct AppError {
    code: String,
    category: ErrorCategory,
    severity: ErrorSeverity,
    message: String,
    user_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    retry: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<ErrorAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Map<String, Value>>,
    timestamp: DateTime<Utc>,
}

impl AppError {
    pub fn new(details: ErrorDetails) -> Self {
        Self {
            code: details.code,
            category: details.category,
            severity: details.severity,
            message: details.message,
            user_message: details.user_message,
            status_code: details.status_code,
            field: details.field,
            retry: details.retry,
            action: details.action,
            metadata: details.metadata,
            timestamp: Utc::now(),
        }
    }

    pub fn network(message: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self::new(ErrorDetails {
            code: "NETWORK_ERROR".to_string(),
            category: ErrorCategory::Network,
            severity: ErrorSeverity::High,
            message: message.into(),
            user_message: user_message.into(),
            status_code: None,
            field: None,
            retry: true,
            action: Some(ErrorAction::Retry),
            metadata: None,
        })
    }

    pub fn auth(
        message: impl Into<String>,
        user_message: impl Into<String>,
        status_code: Option<u16>,
    ) -> Self {
        Self::new(ErrorDetails {
            code: "AUTH_ERROR".to_string(),
            category: ErrorCategory::Auth,
            severity: ErrorSeverity::High,
            message: message.into(),
            user_message: user_message.into(),
            status_code,
            field: None,
            retry: false,
            action: Some(ErrorAction::Login),
            metadata: None,
        })
    }

    pub fn validation(
        message: impl Into<String>,
        user_message: impl Into<String>,
        field: Option<String>,
        metadata: Option<Map<String, Value>>,
    ) -> Self {
        Self::new(ErrorDetails {
            code: "VALIDATION_ERROR".to_string(),
            category: ErrorCategory::Validation,
            severity: ErrorSeverity::Low,
            message: message.into(),
            user_message: user_message.into(),
            status_code: None,
            field,
            retry: false,
            action: Some(ErrorAction::Dismiss),
            metadata,
        })
    }

    pub fn not_found(resource: &str, user_message: impl Into<String>) -> Self {
        Self::new(ErrorDetails {
            code: "NOT_FOUND".to_string(),
            category: ErrorCategory::NotFound,
            severity: ErrorSeverity::Medium,
            message: format!("Resource not found: {resource}"),
            user_message: user_message.into(),
            status_code: Some(404),
            field: None,
            retry: false,
            action: Some(ErrorAction::Dismiss),
            metadata: None,
        })
    }

    pub fn server(
        message: impl Into<String>,
        user_message: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self::new(ErrorDetails {
            code: "SERVER_ERROR".to_string(),
            category: ErrorCategory::Server,
            severity: ErrorSeverity::Critical,
            message: message.into(),
            user_message: user_message.into(),
            status_code: Some(status_code),
            field: None,
            retry: true,
            action: Some(ErrorAction::Retry),
            metadata: None,
        })
    }

    // Attaches a status code to an already-built error (used for HTTP validation failures).
    pub(crate) fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub(crate) fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn retry(&self) -> bool {
        self.retry
    }

    pub fn action(&self) -> Option<ErrorAction> {
        self.action
    }

    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.metadata.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
