// Parse, log, notify, then act on the suggested action.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;

use crate::domain::errors::{AppError, ErrorAction, ErrorSeverity};
use crate::domain::failure::ClientError;
use crate::domain::ports::{Navigator, Translator};
use crate::domain::toast::{ToastPayload, ToastVariant};
use crate::use_cases::error_logger::ErrorLogger;
use crate::use_cases::error_parser::parse_error;
use crate::use_cases::toaster::Toaster;

pub const API_CALL_CONTEXT: &str = "API Call";
pub const AUTHENTICATION_CONTEXT: &str = "Authentication";

const CRITICAL_TOAST: Duration = Duration::from_secs(10);
const STANDARD_TOAST: Duration = Duration::from_secs(5);

// Dotted identifiers such as `errors.network.timeout`.
static MESSAGE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][A-Za-z0-9_]*(\.[A-Za-z0-9_]+)+$").expect("static message key pattern")
});

pub fn is_message_key(text: &str) -> bool {
    MESSAGE_KEY.is_match(text)
}

#[derive(Debug, Clone, Copy)]
pub struct HandleOptions<'a> {
    pub context: Option<&'a str>,
    pub show_notification: bool,
    pub log_error: bool,
}

impl Default for HandleOptions<'_> {
    fn default() -> Self {
        Self {
            context: None,
            show_notification: true,
            log_error: true,
        }
    }
}

impl<'a> HandleOptions<'a> {
    pub fn in_context(context: &'a str) -> Self {
        Self {
            context: Some(context),
            ..Self::default()
        }
    }

    pub fn silent(mut self) -> Self {
        self.show_notification = false;
        self
    }
}

pub struct ErrorHandler {
    logger: Arc<ErrorLogger>,
    toaster: Arc<Toaster>,
    translator: Arc<dyn Translator>,
    navigator: Arc<dyn Navigator>,
}

impl ErrorHandler {
    pub fn new(
        logger: Arc<ErrorLogger>,
        toaster: Arc<Toaster>,
        translator: Arc<dyn Translator>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            logger,
            toaster,
            translator,
            navigator,
        }
    }

    pub fn logger(&self) -> &Arc<ErrorLogger> {
        &self.logger
    }

    pub fn toaster(&self) -> &Arc<Toaster> {
        &self.toaster
    }

    /// Classifies `error` and runs the configured side effects. The classified
    /// error is returned so callers can update their own state.
    pub async fn handle_error(&self, error: &ClientError, options: HandleOptions<'_>) -> AppError {
        let app_error = parse_error(error, options.context);

        if options.log_error {
            self.logger.log_error(&app_error, options.context).await;
        }
        if options.show_notification {
            self.notify(&app_error);
        }
        if app_error.action() == Some(ErrorAction::Login) {
            self.navigator.navigate_to_login();
        }

        app_error
    }

    pub async fn handle_api_error(&self, error: &ClientError, context: Option<&str>) -> AppError {
        self.handle_error(
            error,
            HandleOptions::in_context(context.unwrap_or(API_CALL_CONTEXT)),
        )
        .await
    }

    pub async fn handle_auth_error(&self, error: &ClientError) -> AppError {
        self.handle_error(error, HandleOptions::in_context(AUTHENTICATION_CONTEXT))
            .await
    }

    fn notify(&self, error: &AppError) {
        let description = if is_message_key(error.user_message()) {
            self.translator.translate(error.user_message())
        } else {
            error.user_message().to_string()
        };
        let title = self
            .translator
            .translate(&format!("errors.{}.title", error.category().key_segment()));

        let (variant, duration) = match error.severity() {
            ErrorSeverity::Critical => (ToastVariant::Error, CRITICAL_TOAST),
            ErrorSeverity::High => (ToastVariant::Error, STANDARD_TOAST),
            ErrorSeverity::Medium | ErrorSeverity::Low => (ToastVariant::Warning, STANDARD_TOAST),
        };

        self.toaster.show_toast(ToastPayload {
            variant: Some(variant),
            title: Some(title),
            description: Some(description),
            duration: Some(duration),
        });
    }
}
