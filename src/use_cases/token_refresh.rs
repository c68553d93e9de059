// Proactive refresh: renews the access token shortly before it expires,
// independent of the 401 path in the HTTP client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::ports::{Clock, Navigator, SessionRefresher, TokenInspector};
use crate::use_cases::session::CredentialVault;

pub const REFRESH_LEAD: Duration = Duration::from_secs(5 * 60);

/// How long to wait before refreshing, or `None` when the token has already
/// expired or carries no readable expiry.
pub fn refresh_delay(expires_at: Option<u64>, now_epoch_seconds: u64) -> Option<Duration> {
    let expires_at = expires_at?;
    if expires_at <= now_epoch_seconds {
        return None;
    }
    let remaining = expires_at - now_epoch_seconds;
    Some(Duration::from_secs(
        remaining.saturating_sub(REFRESH_LEAD.as_secs()),
    ))
}

pub struct TokenRefreshScheduler {
    vault: Arc<CredentialVault>,
    refresher: Arc<dyn SessionRefresher>,
    inspector: Arc<dyn TokenInspector>,
    clock: Arc<dyn Clock>,
    navigator: Arc<dyn Navigator>,
    refreshing: AtomicBool,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl TokenRefreshScheduler {
    pub fn new(
        vault: Arc<CredentialVault>,
        refresher: Arc<dyn SessionRefresher>,
        inspector: Arc<dyn TokenInspector>,
        clock: Arc<dyn Clock>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            vault,
            refresher,
            inspector,
            clock,
            navigator,
            refreshing: AtomicBool::new(false),
            task: Mutex::new(None),
        }
    }

    /// Arms the scheduler for the current token and re-arms on every token
    /// update. Calling it again replaces the previous schedule.
    pub fn start(self: &Arc<Self>) {
        let this = Arc::clone(self);
        let handle = tokio::spawn(async move { this.run().await });
        let previous = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    pub fn stop(&self) {
        let handle = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
            tracing::debug!("token refresh scheduler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    async fn run(&self) {
        let mut updates = self.vault.subscribe();
        loop {
            let token = updates.borrow_and_update().clone();
            if let Some(token) = token {
                let expires_at = self.inspector.expires_at(&token);
                match refresh_delay(expires_at, self.clock.now_epoch_seconds()) {
                    None => {
                        tracing::warn!("access token already expired, ending session");
                        self.end_session().await;
                    }
                    Some(delay) => {
                        tracing::debug!(delay_secs = delay.as_secs(), "token refresh scheduled");
                        tokio::select! {
                            _ = tokio::time::sleep(delay) => self.refresh_now().await,
                            changed = updates.changed() => {
                                if changed.is_err() {
                                    return;
                                }
                                continue;
                            }
                        }
                    }
                }
            }

            if updates.changed().await.is_err() {
                return;
            }
        }
    }

    /// One check-and-act pass over the current token: ends the session when it
    /// has expired, refreshes when it is inside the lead window, otherwise
    /// leaves it alone.
    pub async fn refresh_if_due(&self) {
        let Some(token) = self.vault.token() else {
            return;
        };
        let expires_at = self.inspector.expires_at(&token);
        match refresh_delay(expires_at, self.clock.now_epoch_seconds()) {
            None => {
                tracing::warn!("access token already expired, ending session");
                self.end_session().await;
            }
            Some(delay) if delay.is_zero() => {
                tracing::debug!("access token close to expiry, refreshing first");
                self.refresh_now().await;
            }
            Some(_) => {}
        }
    }

    /// Runs one refresh unless one started here is still in progress.
    pub async fn refresh_now(&self) {
        let Some(_in_progress) = InProgress::claim(&self.refreshing) else {
            tracing::debug!("scheduled refresh already running, skipping");
            return;
        };

        if self.vault.token().is_none() {
            tracing::warn!("no access token to refresh");
        } else {
            match self.refresher.refresh_session().await {
                Ok(_) => tracing::info!("access token refreshed ahead of expiry"),
                Err(err) => {
                    tracing::warn!(error = %err, "scheduled token refresh failed");
                    if self.vault.token().is_some() {
                        self.end_session().await;
                    }
                }
            }
        }
    }

    async fn end_session(&self) {
        if let Err(err) = self.vault.clear().await {
            tracing::warn!(error = %err, "failed to clear credentials");
        }
        self.navigator.navigate_to_login();
    }
}

// Holds the in-progress flag; releasing it on drop covers an aborted task.
struct InProgress<'a>(&'a AtomicBool);

impl<'a> InProgress<'a> {
    fn claim(flag: &'a AtomicBool) -> Option<Self> {
        (!flag.swap(true, Ordering::SeqCst)).then(|| Self(flag))
    }
}

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
