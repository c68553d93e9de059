// Tagged failures raised by the HTTP layer, before classification.

use serde_json::Value;

use crate::domain::errors::AppError;
use crate::domain::validation::ValidationIssue;

pub const RESPONSE_VALIDATION_CONTEXT: &str = "API Response Validation";
pub const REQUEST_VALIDATION_CONTEXT: &str = "Request Validation";

#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(String),
    #[error("storage encode error: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    #[error("Request timeout")]
    Timeout,
    #[error("Network offline")]
    Offline,
    // Connection refused, DNS, TLS and similar fetch-layer failures.
    #[error("Failed to fetch: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
        body: Option<Value>,
    },
    #[error("Validation failed at {}: {}", .issue.field(), .issue.message)]
    Validation {
        issue: ValidationIssue,
        context: String,
        payload: Option<Value>,
    },
    #[error("token refresh failed: {0}")]
    RefreshFailed(Box<ClientError>),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Classified(AppError),
    #[error("{0}")]
    Other(String),
}

impl ClientError {
    pub fn http(status: u16, body: Option<Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(backend_message)
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        ClientError::Http {
            status,
            message,
            body,
        }
    }

    pub fn response_validation(issue: ValidationIssue, payload: Value) -> Self {
        ClientError::Validation {
            issue,
            context: RESPONSE_VALIDATION_CONTEXT.to_string(),
            payload: Some(payload),
        }
    }

    pub fn request_validation(issue: ValidationIssue) -> Self {
        ClientError::Validation {
            issue,
            context: REQUEST_VALIDATION_CONTEXT.to_string(),
            payload: None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::RefreshFailed(inner) => inner.status(),
            _ => None,
        }
    }

    // Only a direct 404; a refresh that failed with 404 is still an auth failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Http { status: 404, .. })
    }
}

// Error bodies carry `message` and optionally `detail`; FastAPI defaults only `detail`.
fn backend_message(body: &Value) -> Option<String> {
    ["message", "detail"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
