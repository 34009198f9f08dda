//! Stopping a job cycle from outside the controller.
//!
//! The controller waits on three things while a job is polled: the deadline,
//! the poll ticker (or the in-flight status request) and, when the caller
//! passes one, a [`CancellationToken`]. [`CancellationToken::wait`] is the arm
//! used in that race. Without a token it never resolves, so the race reduces
//! to deadline against ticker.
//!
//! Invariants:
//! - A cancelled token stays cancelled; one token can stop any number of
//!   cycles, including cycles started after the cancel.
//! - Cancelling a token never touches the server; the controller reports
//!   `ClientError::Cancelled` and hands the job to the abandon hook.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// Shared stop signal for job cycles, cloned into whoever may stop them.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    stopped: AtomicBool,
    wake: Notify,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop every cycle watching this token. Repeated calls are no-ops.
    pub fn cancel(&self) {
        if !self.inner.stopped.swap(true, Ordering::SeqCst) {
            self.inner.wake.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
    }

    /// Resolve once the token is cancelled.
    pub async fn cancelled(&self) {
        // Registered before the flag check so a concurrent cancel is seen.
        let woken = self.inner.wake.notified();
        if self.is_cancelled() {
            return;
        }
        woken.await;
    }

    /// Cancellation arm of the controller's wait: resolves when `token` is
    /// cancelled, or never when there is no token.
    pub(crate) async fn wait(token: Option<&Self>) {
        match token {
            Some(token) => token.cancelled().await,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_cancel_is_sticky_across_clones() {
        let token = CancellationToken::new();
        let watcher = token.clone();
        assert!(!watcher.is_cancelled());

        token.cancel();
        token.cancel();
        assert!(watcher.is_cancelled());
    }

    #[tokio::test]
    async fn test_waiting_cycle_is_woken_by_cancel() {
        let token = CancellationToken::new();
        let cycle = {
            let token = token.clone();
            tokio::spawn(async move { CancellationToken::wait(Some(&token)).await })
        };

        tokio::task::yield_now().await;
        token.cancel();

        tokio::time::timeout(Duration::from_secs(1), cycle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_cycle_started_after_cancel_stops_at_once() {
        let token = CancellationToken::new();
        token.cancel();
        tokio::time::timeout(Duration::from_millis(100), token.cancelled())
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_token_never_resolves() {
        let waited = tokio::time::timeout(Duration::from_secs(3600), CancellationToken::wait(None)).await;
        assert!(waited.is_err());
    }
}
