use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validation::{Validate, ValidationIssue, non_empty};

// Profile of the signed-in user, also persisted next to the access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Validate for User {
    fn validate(&self) -> Result<(), ValidationIssue> {
        let valid_email = self
            .email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid_email {
            return Err(ValidationIssue::new("email", "Invalid email"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleLoginRequest {
    // Google id token obtained by the sign-in flow.
    pub token: String,
}

impl Validate for GoogleLoginRequest {
    fn validate(&self) -> Result<(), ValidationIssue> {
        non_empty("token", &self.token)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    // Usually absent: the backend keeps it in an httpOnly cookie.
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

impl Validate for LoginResponse {
    fn validate(&self) -> Result<(), ValidationIssue> {
        self.user.validate().map_err(|issue| issue.under("user"))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

impl Validate for RefreshResponse {
    fn validate(&self) -> Result<(), ValidationIssue> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: User,
}

impl Validate for MeResponse {
    fn validate(&self) -> Result<(), ValidationIssue> {
        self.user.validate().map_err(|issue| issue.under("user"))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub message: String,
}

impl Validate for LogoutResponse {
    fn validate(&self) -> Result<(), ValidationIssue> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutAllResponse {
    pub message: String,
    pub revoked_count: u32,
}

impl Validate for LogoutAllResponse {
    fn validate(&self) -> Result<(), ValidationIssue> {
        Ok(())
    }
}

// One refresh-token backed login on some device.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSessions {
    pub sessions: Vec<ActiveSession>,
    pub total: u32,
}

impl Validate for ActiveSessions {
    fn validate(&self) -> Result<(), ValidationIssue> {
        Ok(())
    }
}
