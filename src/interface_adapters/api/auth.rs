use async_trait::async_trait;

use crate::domain::auth::{
    ActiveSessions, GoogleLoginRequest, LoginResponse, LogoutAllResponse, LogoutResponse,
    MeResponse,
};
use crate::domain::failure::ClientError;
use crate::domain::ports::{AuthApi, SessionRefresher};
use crate::interface_adapters::clients::{ApiClient, ApiRequest};

#[async_trait]
impl AuthApi for ApiClient {
    async fn login_with_google(&self, google_token: &str) -> Result<LoginResponse, ClientError> {
        let request = ApiRequest::post("api/v1/login/google")
            .without_refresh()
            .json(&GoogleLoginRequest {
                token: google_token.to_string(),
            })?;
        let response: LoginResponse = self.send(request).await?;
        self.remember_refresh_cookie().await;
        Ok(response)
    }

    async fn me(&self) -> Result<MeResponse, ClientError> {
        self.send(ApiRequest::get("api/v1/auth/me")).await
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let _: LogoutResponse = self
            .send(ApiRequest::post("api/v1/auth/logout").without_refresh())
            .await?;
        Ok(())
    }

    async fn logout_all(&self) -> Result<LogoutAllResponse, ClientError> {
        self.send(ApiRequest::post("api/v1/auth/logout-all")).await
    }

    async fn active_sessions(&self) -> Result<ActiveSessions, ClientError> {
        self.send(ApiRequest::get("api/v1/auth/sessions")).await
    }
}

#[async_trait]
impl SessionRefresher for ApiClient {
    async fn refresh_session(&self) -> Result<String, ClientError> {
        self.refresh_access_token().await
    }
}
