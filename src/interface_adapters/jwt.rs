// Reads the expiry claim of an access token. The signature is not checked;
// the backend stays the authority on validity.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::domain::ports::TokenInspector;

#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<u64>,
}

/// Expiry as epoch seconds, or `None` if the token is malformed or has no `exp`.
pub fn expires_at(token: &str) -> Option<u64> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    if payload.is_empty() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    claims.exp
}

// Tokens without a readable expiry count as expired.
pub fn is_expired(token: &str, now_epoch_seconds: u64) -> bool {
    match expires_at(token) {
        Some(exp) => now_epoch_seconds >= exp,
        None => true,
    }
}

pub fn seconds_until_expiry(token: &str, now_epoch_seconds: u64) -> u64 {
    expires_at(token)
        .map(|exp| exp.saturating_sub(now_epoch_seconds))
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JwtInspector;

impl TokenInspector for JwtInspector {
    fn expires_at(&self, token: &str) -> Option<u64> {
        expires_at(token)
    }
}

#[cfg(test)]
pub(crate) fn token_expiring_at(exp: u64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"user","exp":{exp}}}"#));
    format!("{header}.{payload}.signature")
}
