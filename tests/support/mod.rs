// In-process stand-in for the planner backend, bound to an ephemeral port.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use planner_client::domain::ports::{KeyValueStore, Navigator, ToastSurface};
use planner_client::domain::toast::ToastPayload;
use planner_client::interface_adapters::clients::{ApiClient, HttpSettings, RetryPolicy};
use planner_client::interface_adapters::storage::InMemoryKeyValueStore;
use planner_client::use_cases::session::CredentialVault;
use serde_json::{Value, json};
use url::Url;

pub const USER_ID: &str = "0d6f5a3e-2f4b-4a8e-9c71-5d3b2a1e0f99";
pub const GROUP_ID: &str = "7a1c2e4b-0000-4000-8000-000000000001";
pub const STALE_TOKEN: &str = "stale-token";
pub const FRESH_TOKEN: &str = "fresh-token";

pub struct MockState {
    valid_token: Mutex<String>,
    refresh_succeeds: AtomicBool,
    refresh_needs_cookie: AtomicBool,
    refresh_calls: AtomicUsize,
    me_calls: AtomicUsize,
    group_calls: AtomicUsize,
    group_failures: AtomicUsize,
    session_calls: AtomicUsize,
}

impl MockState {
    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn me_calls(&self) -> usize {
        self.me_calls.load(Ordering::SeqCst)
    }

    pub fn group_calls(&self) -> usize {
        self.group_calls.load(Ordering::SeqCst)
    }

    pub fn session_calls(&self) -> usize {
        self.session_calls.load(Ordering::SeqCst)
    }

    // Refresh only succeeds when the login's refresh cookie comes along.
    pub fn require_refresh_cookie(&self) {
        self.refresh_needs_cookie.store(true, Ordering::SeqCst);
    }

    pub fn fail_refresh(&self) {
        self.refresh_succeeds.store(false, Ordering::SeqCst);
    }

    // The next `count` group listings answer 503.
    pub fn fail_groups(&self, count: usize) {
        self.group_failures.store(count, Ordering::SeqCst);
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let valid = self.valid_token.lock().expect("token mutex").clone();
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value == format!("Bearer {valid}"))
    }
}

pub struct MockBackend {
    pub base_url: Url,
    pub state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            valid_token: Mutex::new(FRESH_TOKEN.to_string()),
            refresh_succeeds: AtomicBool::new(true),
            refresh_needs_cookie: AtomicBool::new(false),
            refresh_calls: AtomicUsize::new(0),
            me_calls: AtomicUsize::new(0),
            group_calls: AtomicUsize::new(0),
            group_failures: AtomicUsize::new(0),
            session_calls: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/api/v1/login/google", post(login))
            .route("/api/v1/auth/refresh", post(refresh))
            .route("/api/v1/auth/me", get(me))
            .route("/api/v1/auth/sessions", get(sessions))
            .route("/api/v1/groups", get(groups))
            .route("/api/v1/timer/active", get(active_timer))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral test port");
        let addr = listener.local_addr().expect("get local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend failed");
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}")).expect("mock url"),
            state,
        }
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            base_url: self.base_url.clone(),
            request_timeout: Duration::from_secs(5),
            refresh_timeout: Duration::from_secs(5),
            retry: RetryPolicy {
                limit: 2,
                base_delay: Duration::from_millis(10),
                multiplier: 2,
                max_delay: Duration::from_millis(50),
            },
        }
    }
}

fn user_json() -> Value {
    json!({ "id": USER_ID, "email": "ana@example.com", "name": "Ana" })
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Could not validate credentials" })),
    )
        .into_response()
}

async fn login(State(state): State<Arc<MockState>>) -> Response {
    let token = state.valid_token.lock().expect("token mutex").clone();
    let mut response = Json(json!({ "access_token": token, "user": user_json() })).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_static("refresh_token=r-1; Path=/api/v1; HttpOnly"),
    );
    response
}

async fn refresh(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    // Long enough for concurrent 401s to pile up behind the first refresh.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let has_cookie = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("refresh_token=r-1"));
    let cookie_ok = has_cookie || !state.refresh_needs_cookie.load(Ordering::SeqCst);
    if !state.refresh_succeeds.load(Ordering::SeqCst) || !cookie_ok {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Refresh token revoked" })),
        )
            .into_response();
    }
    *state.valid_token.lock().expect("token mutex") = FRESH_TOKEN.to_string();
    Json(json!({ "access_token": FRESH_TOKEN })).into_response()
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.me_calls.fetch_add(1, Ordering::SeqCst);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "user": user_json() })).into_response()
}

// Rejects every token, including freshly refreshed ones.
async fn sessions(State(state): State<Arc<MockState>>) -> Response {
    state.session_calls.fetch_add(1, Ordering::SeqCst);
    unauthorized()
}

async fn groups(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.group_calls.fetch_add(1, Ordering::SeqCst);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    let failing = state
        .group_failures
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
        .is_ok();
    if failing {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::RETRY_AFTER, "0")],
            Json(json!({ "detail": "Service unavailable" })),
        )
            .into_response();
    }
    Json(json!([{
        "id": GROUP_ID,
        "name": "Work",
        "color": "#ff8800",
        "created_at": "2026-01-25T10:00:00Z",
        "updated_at": "2026-01-25T10:00:00Z"
    }]))
    .into_response()
}

async fn active_timer(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "No active timer" })),
    )
        .into_response()
}

#[derive(Default)]
pub struct RecordingNavigator {
    calls: AtomicUsize,
}

impl RecordingNavigator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to_login(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    payloads: Mutex<Vec<ToastPayload>>,
}

impl RecordingSurface {
    pub fn payloads(&self) -> Vec<ToastPayload> {
        self.payloads.lock().expect("surface mutex").clone()
    }
}

impl ToastSurface for RecordingSurface {
    fn add_toast(&self, payload: ToastPayload) -> String {
        let mut payloads = self.payloads.lock().expect("surface mutex");
        payloads.push(payload);
        format!("toast-{}", payloads.len())
    }

    fn remove_toast(&self, _id: &str) {}
}

pub async fn vault_with_token(token: &str) -> Arc<CredentialVault> {
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
    let vault = Arc::new(CredentialVault::load(store).await.expect("load vault"));
    let user = serde_json::from_value(user_json()).expect("user json");
    vault
        .set_session(token.to_string(), user)
        .await
        .expect("set session");
    vault
}

pub fn client(
    backend: &MockBackend,
    vault: Arc<CredentialVault>,
    navigator: Arc<RecordingNavigator>,
) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(backend.http_settings(), vault, navigator).expect("build client"))
}
