// Classifies any client failure into exactly one `AppError`. Never fails itself.

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::domain::errors::{
    AppError, ErrorAction, ErrorCategory, ErrorDetails, ErrorSeverity, message_keys,
};
use crate::domain::failure::{ClientError, RESPONSE_VALIDATION_CONTEXT};
use crate::domain::validation::ValidationIssue;

#[derive(Debug, Default, Deserialize)]
struct BackendError {
    code: Option<String>,
    field: Option<String>,
    errors: Option<Vec<FieldError>>,
}

#[derive(Debug, Deserialize)]
struct FieldError {
    field: Option<String>,
    message: Option<String>,
}

pub fn parse_error(error: &ClientError, context: Option<&str>) -> AppError {
    match error {
        ClientError::Classified(app_error) => app_error.clone(),
        ClientError::Timeout => AppError::network("Request timeout", message_keys::NETWORK_TIMEOUT),
        ClientError::Http {
            status,
            message,
            body,
        } => parse_http(*status, message, body.as_ref(), context),
        ClientError::Validation {
            issue,
            context: raised_in,
            payload,
        } => parse_validation(issue, Some(raised_in.as_str()).or(context), payload.as_ref()),
        ClientError::Offline => {
            AppError::network("No internet connection", message_keys::NETWORK_OFFLINE)
        }
        ClientError::Network(_) => {
            AppError::network("Network request failed", message_keys::NETWORK_GENERIC)
        }
        ClientError::RefreshFailed(cause) => AppError::auth(
            format!("Session refresh failed: {cause}"),
            message_keys::AUTH_SESSION_EXPIRED,
            Some(cause.status().unwrap_or(401)),
        )
        .with_code("AUTH_REFRESH_FAILED"),
        ClientError::Storage(err) => unknown(err.to_string()),
        ClientError::Other(message) => unknown(message.clone()),
    }
}

fn unknown(message: String) -> AppError {
    AppError::new(ErrorDetails {
        code: "UNKNOWN_ERROR".to_string(),
        category: ErrorCategory::Unknown,
        severity: ErrorSeverity::Medium,
        message,
        user_message: message_keys::UNKNOWN_GENERIC.to_string(),
        status_code: None,
        field: None,
        retry: false,
        action: Some(ErrorAction::Dismiss),
        metadata: None,
    })
}

fn parse_http(status: u16, message: &str, body: Option<&Value>, context: Option<&str>) -> AppError {
    let backend: BackendError = body
        .and_then(|body| BackendError::deserialize(body).ok())
        .unwrap_or_default();

    match status {
        400 => match backend.errors.as_deref().and_then(<[FieldError]>::first) {
            Some(first) => AppError::validation(
                message,
                first
                    .message
                    .clone()
                    .unwrap_or_else(|| message_keys::VALIDATION_GENERIC.to_string()),
                first.field.clone(),
                None,
            ),
            None => AppError::validation(
                message,
                message_keys::VALIDATION_GENERIC,
                backend.field,
                None,
            ),
        }
        .with_status(status),
        401 => AppError::auth(message, message_keys::AUTH_SESSION_EXPIRED, Some(status)),
        403 => AppError::auth(message, message_keys::AUTH_UNAUTHORIZED, Some(status)),
        404 => AppError::not_found(context.unwrap_or("Resource"), message_keys::NOT_FOUND_RESOURCE),
        // Conflict details are meant for the user as-is.
        409 => AppError::validation(message, message, backend.field, None).with_status(status),
        422 => AppError::validation(message, message_keys::VALIDATION_GENERIC, backend.field, None)
            .with_status(status),
        429 => AppError::new(ErrorDetails {
            code: "RATE_LIMIT".to_string(),
            category: ErrorCategory::Client,
            severity: ErrorSeverity::Medium,
            message: "Too many requests".to_string(),
            user_message: message_keys::RATE_LIMITED.to_string(),
            status_code: Some(status),
            field: None,
            retry: true,
            action: Some(ErrorAction::Retry),
            metadata: None,
        }),
        500 | 502 | 503 | 504 => AppError::server(message, message_keys::SERVER_INTERNAL, status),
        status if status >= 500 => AppError::server(message, message_keys::SERVER_GENERIC, status),
        status => AppError::new(ErrorDetails {
            code: backend.code.unwrap_or_else(|| format!("HTTP_{status}")),
            category: ErrorCategory::Client,
            severity: ErrorSeverity::Medium,
            message: message.to_string(),
            user_message: message.to_string(),
            status_code: Some(status),
            field: None,
            retry: false,
            action: Some(ErrorAction::Dismiss),
            metadata: None,
        }),
    }
}

// A response that does not match its schema is an integration bug, so the
// user sees the generic server copy rather than an input hint.
fn parse_validation(
    issue: &ValidationIssue,
    context: Option<&str>,
    payload: Option<&Value>,
) -> AppError {
    let field = issue.field().to_string();
    let (message, user_message) = if context == Some(RESPONSE_VALIDATION_CONTEXT) {
        (
            format!("Server returned invalid data: {field} - {}", issue.message),
            message_keys::SERVER_GENERIC,
        )
    } else if issue.message == "Required" {
        (
            format!("Missing required field: {field}"),
            message_keys::VALIDATION_GENERIC,
        )
    } else {
        (issue.message.clone(), message_keys::VALIDATION_GENERIC)
    };

    let mut metadata = Map::new();
    metadata.insert(
        "issues".to_string(),
        json!([{ "path": issue.path, "message": issue.message }]),
    );
    if let Some(payload) = payload {
        metadata.insert("payload".to_string(), payload.clone());
    }

    AppError::validation(message, user_message, Some(field), Some(metadata))
}
