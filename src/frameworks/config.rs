// Client configuration: optional TOML file, then environment overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::interface_adapters::clients::{HttpSettings, RetryPolicy};
use crate::use_cases::error_logger::ErrorLoggerConfig;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_REFRESH_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_RETRY_LIMIT: u32 = 2;
pub const DEFAULT_RETRY_BACKOFF_CAP_MS: u64 = 3_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid api base url {value:?}: {source}")]
    BaseUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("no state path configured and no data directory available")]
    NoStatePath,
}

// Shape of the optional TOML file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_base_url: Option<String>,
    pub request_timeout_ms: Option<u64>,
    pub refresh_timeout_ms: Option<u64>,
    pub retry_limit: Option<u32>,
    pub retry_backoff_cap_ms: Option<u64>,
    pub state_path: Option<PathBuf>,
    pub messages_path: Option<PathBuf>,
    pub telemetry_dsn: Option<String>,
    pub environment: Option<String>,
    pub release: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: Url,
    pub request_timeout: Duration,
    pub refresh_timeout: Duration,
    pub retry_limit: u32,
    pub retry_backoff_cap: Duration,
    pub state_path: PathBuf,
    pub messages_path: Option<PathBuf>,
    pub telemetry_dsn: Option<String>,
    pub environment: Option<String>,
    pub release: Option<String>,
}

impl ClientConfig {
    /// Reads `PLANNER_CONFIG` (if set) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let lookup = |key: &str| std::env::var(key).ok();
        let file = match lookup("PLANNER_CONFIG") {
            Some(path) => FileConfig::load(Path::new(&path))?,
            None => FileConfig::default(),
        };
        Self::resolve(file, lookup, default_state_path())
    }

    /// Env values win over file values, which win over defaults.
    pub fn resolve(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
        fallback_state_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let base = env("PLANNER_API_BASE_URL")
            .or(file.api_base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_base_url = Url::parse(&base).map_err(|source| ConfigError::BaseUrl {
            value: base.clone(),
            source,
        })?;

        let request_timeout_ms = numeric(
            &env,
            "PLANNER_REQUEST_TIMEOUT_MS",
            file.request_timeout_ms,
            DEFAULT_REQUEST_TIMEOUT_MS,
        );
        let refresh_timeout_ms = numeric(
            &env,
            "PLANNER_REFRESH_TIMEOUT_MS",
            file.refresh_timeout_ms,
            DEFAULT_REFRESH_TIMEOUT_MS,
        );
        let retry_limit = numeric(
            &env,
            "PLANNER_RETRY_LIMIT",
            file.retry_limit,
            DEFAULT_RETRY_LIMIT,
        );
        let backoff_cap_ms = numeric(
            &env,
            "PLANNER_RETRY_BACKOFF_CAP_MS",
            file.retry_backoff_cap_ms,
            DEFAULT_RETRY_BACKOFF_CAP_MS,
        );

        let state_path = env("PLANNER_STATE_PATH")
            .map(PathBuf::from)
            .or(file.state_path)
            .or(fallback_state_path)
            .ok_or(ConfigError::NoStatePath)?;

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_millis(request_timeout_ms),
            refresh_timeout: Duration::from_millis(refresh_timeout_ms),
            retry_limit,
            retry_backoff_cap: Duration::from_millis(backoff_cap_ms),
            state_path,
            messages_path: env("PLANNER_MESSAGES")
                .map(PathBuf::from)
                .or(file.messages_path),
            telemetry_dsn: env("PLANNER_TELEMETRY_DSN").or(file.telemetry_dsn),
            environment: env("PLANNER_ENVIRONMENT").or(file.environment),
            release: env("PLANNER_RELEASE").or(file.release),
        })
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            base_url: self.api_base_url.clone(),
            request_timeout: self.request_timeout,
            refresh_timeout: self.refresh_timeout,
            retry: RetryPolicy::default()
                .with_limit(self.retry_limit)
                .with_max_delay(self.retry_backoff_cap),
        }
    }

    // Remote forwarding is on whenever a DSN is configured.
    pub fn logger_config(&self) -> ErrorLoggerConfig {
        ErrorLoggerConfig {
            enabled: self.telemetry_dsn.is_some(),
            dsn: self.telemetry_dsn.clone(),
            environment: self.environment.clone(),
            release: self.release.clone(),
        }
    }
}

pub fn default_state_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("planner").join("session.json"))
}

fn numeric<T>(env: &impl Fn(&str) -> Option<String>, key: &str, file: Option<T>, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match env(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "invalid numeric setting, using default");
                default
            }
        },
        None => file.unwrap_or(default),
    }
}
