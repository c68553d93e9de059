// Session lifecycle on top of the credential vault.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::{RwLock, watch};

use crate::domain::auth::{ActiveSessions, LoginResponse, LogoutAllResponse, User};
use crate::domain::failure::ClientError;
use crate::domain::ports::{AuthApi, SessionRefresher};
use crate::use_cases::error_handler::ErrorHandler;
use crate::use_cases::error_parser::parse_error;
use crate::use_cases::session::CredentialVault;
use crate::use_cases::stores::LoadStatus;

const FETCH_USER_CONTEXT: &str = "Fetch Current User";
const REFRESH_CONTEXT: &str = "Token Refresh";
const SESSIONS_CONTEXT: &str = "Fetching Active Sessions";

pub struct AuthStore {
    api: Arc<dyn AuthApi>,
    refresher: Arc<dyn SessionRefresher>,
    vault: Arc<CredentialVault>,
    errors: Arc<ErrorHandler>,
    status: RwLock<LoadStatus>,
}

impl AuthStore {
    pub fn new(
        api: Arc<dyn AuthApi>,
        refresher: Arc<dyn SessionRefresher>,
        vault: Arc<CredentialVault>,
        errors: Arc<ErrorHandler>,
    ) -> Self {
        Self {
            api,
            refresher,
            vault,
            errors,
            status: RwLock::new(LoadStatus::default()),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.vault.token()
    }

    pub fn user(&self) -> Option<User> {
        self.vault.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.vault.is_authenticated()
    }

    /// Fires whenever a new access token is stored, and with `None` on logout.
    pub fn on_token_updated(&self) -> watch::Receiver<Option<String>> {
        self.vault.subscribe()
    }

    pub async fn status(&self) -> LoadStatus {
        self.status.read().await.clone()
    }

    async fn begin(&self, loading: bool) {
        let mut status = self.status.write().await;
        status.loading = loading;
        status.error = None;
    }

    async fn fail(&self, summary: &str) {
        let mut status = self.status.write().await;
        status.loading = false;
        status.error = Some(summary.to_string());
    }

    async fn done(&self) {
        self.status.write().await.loading = false;
    }

    // Records a failure through the logger only; these paths never toast.
    async fn log_quietly(&self, err: &ClientError, context: &str) {
        let classified = parse_error(err, Some(context));
        self.errors
            .logger()
            .log_error(&classified, Some(context))
            .await;
    }

    async fn clear_session(&self) {
        if let Err(err) = self.vault.clear().await {
            tracing::warn!(error = %err, "failed to clear stored credentials");
        }
    }

    pub async fn login_with_google(&self, google_token: &str) -> Result<LoginResponse, ClientError> {
        self.begin(true).await;
        let result = match self.api.login_with_google(google_token).await {
            Ok(response) => self
                .vault
                .set_session(response.access_token.clone(), response.user.clone())
                .await
                .map(|()| response)
                .map_err(ClientError::from),
            Err(err) => Err(err),
        };

        match result {
            Ok(response) => {
                self.done().await;
                self.errors.logger().log_info(
                    "user logged in via google",
                    Some(&json!({ "userId": response.user.id })),
                );
                Ok(response)
            }
            Err(err) => {
                self.fail("Google login failed").await;
                self.errors.handle_auth_error(&err).await;
                Err(err)
            }
        }
    }

    /// Reloads the profile for the stored token. `None` without a token.
    /// Any failure ends the local session.
    pub async fn fetch_current_user(&self) -> Result<Option<User>, ClientError> {
        if self.vault.token().is_none() {
            return Ok(None);
        }

        self.begin(true).await;
        let result = match self.api.me().await {
            Ok(response) => self
                .vault
                .set_user(response.user.clone())
                .await
                .map(|()| response.user)
                .map_err(ClientError::from),
            Err(err) => Err(err),
        };

        match result {
            Ok(user) => {
                self.done().await;
                Ok(Some(user))
            }
            Err(err) => {
                self.fail("Failed to fetch user").await;
                self.log_quietly(&err, FETCH_USER_CONTEXT).await;
                self.clear_session().await;
                Err(err)
            }
        }
    }

    pub async fn refresh(&self) -> Result<String, ClientError> {
        self.begin(false).await;
        match self.refresher.refresh_session().await {
            Ok(token) => {
                tracing::info!("token refreshed");
                Ok(token)
            }
            Err(err) => {
                self.fail("Token refresh failed").await;
                self.log_quietly(&err, REFRESH_CONTEXT).await;
                self.clear_session().await;
                Err(err)
            }
        }
    }

    /// Best effort against the server; the local session always ends.
    pub async fn logout(&self) {
        self.begin(false).await;
        match self.api.logout().await {
            Ok(()) => self.errors.logger().log_info("user logged out", None),
            Err(err) => {
                self.fail("Logout failed").await;
                self.errors.logger().log_warning(
                    "logout request failed",
                    Some(&json!({ "error": err.to_string() })),
                );
            }
        }
        self.clear_session().await;
    }

    pub async fn logout_all(&self) -> Result<LogoutAllResponse, ClientError> {
        self.begin(true).await;
        match self.api.logout_all().await {
            Ok(response) => {
                self.done().await;
                tracing::info!(revoked = response.revoked_count, "logged out from all devices");
                self.clear_session().await;
                Ok(response)
            }
            Err(err) => {
                self.fail("Logout failed").await;
                self.errors.handle_auth_error(&err).await;
                Err(err)
            }
        }
    }

    pub async fn active_sessions(&self) -> Result<ActiveSessions, ClientError> {
        match self.api.active_sessions().await {
            Ok(sessions) => Ok(sessions),
            Err(err) => {
                self.errors.handle_api_error(&err, Some(SESSIONS_CONTEXT)).await;
                Err(err)
            }
        }
    }
}
