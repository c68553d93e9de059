use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Success,
    Error,
    Warning,
}

// What a producer hands to the surface; the surface assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToastPayload {
    pub variant: Option<ToastVariant>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<Duration>,
}

impl ToastPayload {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

// A toast as held by the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToastItem {
    pub id: String,
    #[serde(flatten)]
    pub payload: ToastPayload,
}
