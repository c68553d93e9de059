// Message catalog backing the `Translator` port. Keys are dotted paths;
// TOML tables nest the same way (`[errors.network] timeout = "..."`).

use std::collections::HashMap;
use std::path::Path;

use toml::Value;

use crate::domain::errors::message_keys;
use crate::domain::ports::Translator;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read message catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse message catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

const ENGLISH: &[(&str, &str)] = &[
    (message_keys::NETWORK_TIMEOUT, "The request took too long. Please try again."),
    (message_keys::NETWORK_OFFLINE, "You appear to be offline. Check your connection."),
    (message_keys::NETWORK_GENERIC, "Could not reach the server."),
    (message_keys::AUTH_SESSION_EXPIRED, "Your session has expired. Please sign in again."),
    (message_keys::AUTH_UNAUTHORIZED, "You are not signed in."),
    (message_keys::VALIDATION_GENERIC, "Some of the data is invalid."),
    (message_keys::NOT_FOUND_RESOURCE, "The requested item could not be found."),
    (message_keys::SERVER_INTERNAL, "The server ran into a problem. Please try later."),
    (message_keys::SERVER_GENERIC, "The server could not handle the request."),
    (message_keys::UNKNOWN_GENERIC, "Something went wrong."),
    ("errors.network.title", "Connection problem"),
    ("errors.auth.title", "Authentication"),
    ("errors.validation.title", "Invalid data"),
    ("errors.not_found.title", "Not found"),
    ("errors.permission.title", "Permission denied"),
    ("errors.server.title", "Server error"),
    ("errors.client.title", "Request failed"),
    ("errors.unknown.title", "Error"),
];

#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn english() -> Self {
        let messages = ENGLISH
            .iter()
            .map(|(key, text)| (key.to_string(), text.to_string()))
            .collect();
        Self { messages }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let table: toml::Table = toml::from_str(raw)?;
        let mut messages = HashMap::new();
        flatten("", &Value::Table(table), &mut messages);
        Ok(Self { messages })
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Entries in `other` win over existing ones.
    pub fn merged(mut self, other: MessageCatalog) -> Self {
        self.messages.extend(other.messages);
        self
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Table(table) => {
            for (key, nested) in table {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, nested, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        other => {
            tracing::debug!(key = prefix, kind = other.type_str(), "skipping non-string message");
        }
    }
}

impl Translator for MessageCatalog {
    fn translate(&self, key: &str) -> String {
        match self.messages.get(key) {
            Some(text) => text.clone(),
            None => key.to_string(),
        }
    }
}
