// Credential vault: the access token and user profile, persisted together.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::domain::auth::User;
use crate::domain::failure::StorageError;
use crate::domain::ports::KeyValueStore;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "auth_user";
pub const REFRESH_COOKIE_KEY: &str = "refresh_cookie";

pub struct CredentialVault {
    store: Arc<dyn KeyValueStore>,
    token_tx: watch::Sender<Option<String>>,
    user_tx: watch::Sender<Option<User>>,
    refresh_cookie: watch::Sender<Option<String>>,
    generation: AtomicU64,
}

impl CredentialVault {
    // Restores whatever the previous run persisted.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let token = store.get(TOKEN_KEY).await?;
        let user = match store.get(USER_KEY).await? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    tracing::warn!(error = %err, "stored user profile is unreadable");
                    None
                }
            },
            None => None,
        };
        let refresh_cookie = store.get(REFRESH_COOKIE_KEY).await?;

        Ok(Self {
            store,
            token_tx: watch::Sender::new(token),
            user_tx: watch::Sender::new(user),
            refresh_cookie: watch::Sender::new(refresh_cookie),
            generation: AtomicU64::new(0),
        })
    }

    pub fn token(&self) -> Option<String> {
        self.token_tx.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.user_tx.borrow().clone()
    }

    // Cookie header the backend set for its refresh endpoint, if any.
    pub fn refresh_cookie(&self) -> Option<String> {
        self.refresh_cookie.borrow().clone()
    }

    /// Bumped on every [`CredentialVault::clear`], so holders of session state
    /// outside the vault can tell that the session ended.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    // A token alone is not a session; the profile must be loaded too.
    pub fn is_authenticated(&self) -> bool {
        self.token_tx.borrow().is_some() && self.user_tx.borrow().is_some()
    }

    /// Fires with the new token whenever one is issued, and with `None` when the
    /// session ends.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.token_tx.subscribe()
    }

    pub async fn set_session(&self, token: String, user: User) -> Result<(), StorageError> {
        self.persist_user(&user).await?;
        self.user_tx.send_replace(Some(user));
        self.set_token(token).await
    }

    pub async fn set_token(&self, token: String) -> Result<(), StorageError> {
        self.store.set(TOKEN_KEY, token.clone()).await?;
        self.token_tx.send_replace(Some(token));
        Ok(())
    }

    pub async fn set_user(&self, user: User) -> Result<(), StorageError> {
        self.persist_user(&user).await?;
        self.user_tx.send_replace(Some(user));
        Ok(())
    }

    pub async fn set_refresh_cookie(&self, cookie: String) -> Result<(), StorageError> {
        if self.refresh_cookie.borrow().as_deref() == Some(cookie.as_str()) {
            return Ok(());
        }
        self.store.set(REFRESH_COOKIE_KEY, cookie.clone()).await?;
        self.refresh_cookie.send_replace(Some(cookie));
        Ok(())
    }

    // Memory is cleared even when the backing store fails.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.user_tx.send_replace(None);
        self.token_tx.send_replace(None);
        self.refresh_cookie.send_replace(None);
        let token_result = self.store.remove(TOKEN_KEY).await;
        let user_result = self.store.remove(USER_KEY).await;
        let cookie_result = self.store.remove(REFRESH_COOKIE_KEY).await;
        token_result.and(user_result).and(cookie_result)
    }

    async fn persist_user(&self, user: &User) -> Result<(), StorageError> {
        let encoded =
            serde_json::to_string(user).map_err(|err| StorageError::Encode(err.to_string()))?;
        self.store.set(USER_KEY, encoded).await
    }
}
