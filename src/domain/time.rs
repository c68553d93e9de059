// Wire time strings: the backend may send HH:mm, HH:mm:ss or a full ISO datetime.
// Internally every start/end time is kept as HH:mm.

use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::LazyLock;

static HH_MM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1][0-9]|2[0-3]):[0-5][0-9]$").expect("static time pattern")
});

static HH_MM_SS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9]$").expect("static time pattern")
});

/// Strict outbound format.
pub fn is_hh_mm(value: &str) -> bool {
    HH_MM.is_match(value)
}

/// Normalize a start/end time to HH:mm. Unknown shapes are returned as-is.
pub fn normalize_time(value: &str) -> String {
    if is_hh_mm(value) {
        return value.to_string();
    }
    if HH_MM_SS.is_match(value) {
        return value[..5].to_string();
    }
    if let Some((_, time_part)) = value.split_once('T') {
        let time_part = time_part.split('.').next().unwrap_or(time_part);
        if !time_part.is_empty() {
            return time_part.chars().take(5).collect();
        }
    }
    value.to_string()
}

/// Task schedule times: empty collapses to none, seconds are stripped.
pub fn normalize_optional_time(value: Option<String>) -> Option<String> {
    let value = value.filter(|v| !v.is_empty())?;
    if HH_MM_SS.is_match(&value) {
        return Some(value[..5].to_string());
    }
    Some(value)
}

pub(crate) fn deserialize_time<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_time(&raw))
}

pub(crate) fn deserialize_optional_time<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|value| normalize_time(&value)))
}

pub(crate) fn deserialize_schedule_time<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(normalize_optional_time(raw))
}
