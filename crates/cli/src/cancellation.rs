//! Ctrl+C handling for the query loop.
//!
//! Responsibilities:
//! - Install the SIGINT listener that cancels the shared [`CancellationToken`].
//! - Recognize cancellation errors coming back through `anyhow::Result`.
//!
//! Invariants:
//! - The listener cancels at most once; the token stays cancelled.

use pandora_client::{CancellationToken, ClientError};

/// Spawn a task that cancels `token` on Ctrl+C.
pub fn cancel_on_ctrl_c(token: &CancellationToken) {
    let token = token.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        token.cancel();
    });
}

/// Returns true if this anyhow error represents a cancellation.
pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| matches!(cause.downcast_ref::<ClientError>(), Some(ClientError::Cancelled)))
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nQuery cancelled by user");
}
