use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::cookie::CookieStore;
use reqwest::header::RETRY_AFTER;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::domain::auth::RefreshResponse;
use crate::domain::failure::ClientError;
use crate::domain::ports::Navigator;
use crate::domain::validation::{Validate, ValidationIssue};
use crate::interface_adapters::clients::cookies::SessionCookies;
use crate::interface_adapters::clients::decode::decode_response;
use crate::interface_adapters::clients::refresh::RefreshGate;
use crate::interface_adapters::clients::request::{ApiRequest, RequestBody};
use crate::interface_adapters::clients::retry::{RetryPolicy, parse_retry_after};
use crate::use_cases::session::CredentialVault;

const REFRESH_PATH: &str = "api/v1/auth/refresh";
// The backend scopes its refresh cookie to the API prefix.
const COOKIE_SCOPE: &str = "Path=/api/v1";

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub base_url: Url,
    pub request_timeout: Duration,
    pub refresh_timeout: Duration,
    pub retry: RetryPolicy,
}

// Shared reqwest wrapper: bearer injection, retries and single-flight refresh.
pub struct ApiClient {
    http: Client,
    cookies: Arc<SessionCookies>,
    // Vault generation the cookie store belongs to.
    cookie_generation: AtomicU64,
    base_url: Url,
    refresh_timeout: Duration,
    retry: RetryPolicy,
    vault: Arc<CredentialVault>,
    navigator: Arc<dyn Navigator>,
    gate: RefreshGate,
}

impl ApiClient {
    pub fn new(
        settings: HttpSettings,
        vault: Arc<CredentialVault>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        let base_url = with_trailing_slash(settings.base_url);
        let cookies = Arc::new(SessionCookies::default());
        if let Some(stored) = vault.refresh_cookie() {
            let scope = base_url
                .join(REFRESH_PATH)
                .map_err(|err| ClientError::Other(format!("invalid base url: {err}")))?;
            for pair in stored.split("; ").filter(|pair| !pair.is_empty()) {
                cookies.add_cookie_str(&format!("{pair}; {COOKIE_SCOPE}"), &scope);
            }
        }

        let http = Client::builder()
            .timeout(settings.request_timeout)
            .cookie_provider(cookies.clone())
            .build()
            .map_err(|err| ClientError::Other(format!("failed to build http client: {err}")))?;

        Ok(Self {
            http,
            cookies,
            cookie_generation: AtomicU64::new(vault.generation()),
            base_url,
            refresh_timeout: settings.refresh_timeout,
            retry: settings.retry,
            vault,
            navigator,
            gate: RefreshGate::new(),
        })
    }

    pub fn vault(&self) -> &Arc<CredentialVault> {
        &self.vault
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn refresh_in_flight(&self) -> bool {
        self.gate.in_flight()
    }

    /// Sends the request and decodes the response into `T`.
    pub async fn send<T>(&self, request: ApiRequest) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Validate,
    {
        let body = self.execute(&request).await?;
        decode_response(body)
    }

    /// Like [`ApiClient::send`], but a 404 means "nothing there" instead of a failure.
    pub async fn send_optional<T>(&self, request: ApiRequest) -> Result<Option<T>, ClientError>
    where
        T: DeserializeOwned + Validate,
    {
        match self.execute(&request).await {
            Ok(body) => decode_response(body).map(Some),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    // For endpoints whose response body carries nothing the caller needs.
    pub async fn send_discarding(&self, request: ApiRequest) -> Result<(), ClientError> {
        self.execute(&request).await.map(|_| ())
    }

    /// Obtains a new access token, joining a refresh that is already running.
    /// A failed refresh ends the session: credentials are cleared and the
    /// navigator is sent to login, once per refresh.
    pub async fn refresh_access_token(&self) -> Result<String, ClientError> {
        self.gate
            .run(|| async {
                match self.request_new_token().await {
                    Ok(token) => {
                        if let Err(err) = self.vault.set_token(token.clone()).await {
                            tracing::warn!(error = %err, "failed to persist refreshed token");
                        }
                        self.remember_refresh_cookie().await;
                        tracing::info!("access token refreshed");
                        Ok(token)
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "token refresh failed, ending session");
                        if let Err(clear_err) = self.vault.clear().await {
                            tracing::warn!(error = %clear_err, "failed to clear credentials");
                        }
                        self.sync_cookies();
                        self.navigator.navigate_to_login();
                        Err(ClientError::RefreshFailed(Box::new(err)))
                    }
                }
            })
            .await
    }

    // Copies the backend's refresh cookie into the vault so later runs can refresh.
    pub async fn remember_refresh_cookie(&self) {
        self.sync_cookies();
        let Ok(scope) = self.base_url.join(REFRESH_PATH) else {
            return;
        };
        let Some(header) = self.cookies.cookies(&scope) else {
            return;
        };
        let Ok(value) = header.to_str() else {
            return;
        };
        if let Err(err) = self.vault.set_refresh_cookie(value.to_string()).await {
            tracing::warn!(error = %err, "failed to persist refresh cookie");
        }
    }

    // Once the vault has been cleared, the cookies of that session must not be
    // sent again or copied back into the vault.
    fn sync_cookies(&self) {
        let current = self.vault.generation();
        if self.cookie_generation.swap(current, Ordering::SeqCst) != current {
            self.cookies.clear();
            tracing::debug!("session cleared, dropped stored cookies");
        }
    }

    #[tracing::instrument(skip_all, fields(method = %request.method(), path = request.path()))]
    async fn execute(&self, request: &ApiRequest) -> Result<Value, ClientError> {
        let sent_token = self.vault.token();
        let result = self.dispatch_with_retry(request, sent_token.as_deref()).await;

        let unauthorized = matches!(&result, Err(ClientError::Http { status: 401, .. }));
        if !unauthorized || !request.refresh_on_unauthorized() {
            return result;
        }

        // Another request may have refreshed while this one was on the wire.
        let current = self.vault.token();
        let token = match current {
            Some(current) if Some(&current) != sent_token.as_ref() => current,
            _ => {
                tracing::debug!("access token rejected, refreshing");
                self.refresh_access_token().await?
            }
        };

        // Replayed once; a second 401 goes back to the caller as-is.
        self.dispatch_with_retry(request, Some(&token)).await
    }

    async fn dispatch_with_retry(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<Value, ClientError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let response = self.dispatch(request, token, None).await?;
            let status = response.status();
            if status.is_success() {
                return read_body(response).await;
            }

            if self.retry.should_retry(request.method(), status.as_u16(), attempts) {
                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|value| value.to_str().ok())
                    .and_then(parse_retry_after);
                let delay = self.retry.next_delay(attempts, retry_after);
                tracing::warn!(
                    status = status.as_u16(),
                    attempt = attempts,
                    delay_ms = delay.as_millis() as u64,
                    "transient response, retrying"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            return Err(error_from_response(response).await);
        }
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Response, ClientError> {
        self.sync_cookies();
        let url = self.base_url.join(request.path()).map_err(|err| {
            ClientError::Other(format!("invalid request path {}: {err}", request.path()))
        })?;

        let mut builder = self.http.request(request.method().clone(), url);
        if !request.query_params().is_empty() {
            builder = builder.query(request.query_params());
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder = match request.body() {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::File {
                field,
                file_name,
                bytes,
            } => {
                let part = Part::bytes(bytes.clone()).file_name(file_name.clone());
                builder.multipart(Form::new().part(field.clone(), part))
            }
        };

        builder.send().await.map_err(classify_transport)
    }

    // The refresh call itself: no retry, no replay, its own timeout.
    async fn request_new_token(&self) -> Result<String, ClientError> {
        let request = ApiRequest::post(REFRESH_PATH).without_refresh();
        let response = self
            .dispatch(&request, None, Some(self.refresh_timeout))
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        let refreshed: RefreshResponse = decode_response(read_body(response).await?)?;
        Ok(refreshed.access_token)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn classify_transport(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else if err.is_connect() {
        ClientError::Offline
    } else {
        ClientError::Network(err.to_string())
    }
}

async fn read_body(response: Response) -> Result<Value, ClientError> {
    let bytes = response.bytes().await.map_err(classify_transport)?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|err| {
        ClientError::response_validation(
            ValidationIssue::new("", format!("Response body is not JSON: {err}")),
            Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        )
    })
}

async fn error_from_response(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = match response.bytes().await {
        Ok(bytes) if !bytes.is_empty() => serde_json::from_slice::<Value>(&bytes).ok(),
        _ => None,
    };
    ClientError::http(status, body)
}
