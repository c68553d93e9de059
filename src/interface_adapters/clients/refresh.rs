// Single-flight gate for token refresh. The first caller runs the refresh;
// callers arriving while it runs wait for its outcome instead of refreshing again.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

use crate::domain::failure::ClientError;

pub type RefreshOutcome = Result<String, ClientError>;

#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

#[derive(Default)]
pub struct RefreshGate {
    state: Mutex<RefreshState>,
}

enum Role {
    Leader,
    Waiter(oneshot::Receiver<RefreshOutcome>),
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    // The lock is never held across an await, so a poisoned guard is still consistent.
    fn lock(&self) -> MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn in_flight(&self) -> bool {
        self.lock().in_flight
    }

    pub fn waiting(&self) -> usize {
        self.lock().waiters.len()
    }

    /// Runs `refresh` unless one is already running, in which case the caller
    /// waits for that one. Every waiter receives the leader's outcome, in the
    /// order they arrived.
    pub async fn run<F, Fut>(&self, refresh: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RefreshOutcome>,
    {
        let role = {
            let mut state = self.lock();
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Role::Waiter(rx)
            } else {
                state.in_flight = true;
                Role::Leader
            }
        };

        match role {
            Role::Waiter(rx) => {
                tracing::debug!("waiting for in-flight token refresh");
                rx.await.unwrap_or_else(|_| Err(abandoned()))
            }
            Role::Leader => {
                let mut lease = Lease {
                    gate: self,
                    settled: false,
                };
                let outcome = refresh().await;
                lease.settle(&outcome);
                outcome
            }
        }
    }

    fn settle(&self, outcome: &RefreshOutcome) {
        let waiters = {
            let mut state = self.lock();
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };
        for waiter in waiters {
            // A waiter whose request was dropped no longer cares.
            let _ = waiter.send(outcome.clone());
        }
    }
}

fn abandoned() -> ClientError {
    ClientError::RefreshFailed(Box::new(ClientError::Other(
        "token refresh was abandoned".to_string(),
    )))
}

// Releases the gate if the leader's future is dropped mid-refresh.
struct Lease<'a> {
    gate: &'a RefreshGate,
    settled: bool,
}

impl Lease<'_> {
    fn settle(&mut self, outcome: &RefreshOutcome) {
        self.settled = true;
        self.gate.settle(outcome);
    }
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.gate.settle(&Err(abandoned()));
        }
    }
}
