//! Utility functions.

use std::future::Future;
use std::io;

use tokio::sync::watch;
use tracing::{info, warn};

/// Cancellation flag flipped to `true` on Ctrl-C.
///
/// Must be called from within a tokio runtime.
pub fn shutdown_channel() -> watch::Receiver<bool> {
    watch_signal(tokio::signal::ctrl_c())
}

/// Flip the returned flag once `signal` resolves successfully.
///
/// If the listener cannot be installed the flag never flips and the sender
/// stays alive, so the loop keeps running until the process is killed.
fn watch_signal<F>(signal: F) -> watch::Receiver<bool>
where
    F: Future<Output = io::Result<()>> + Send + 'static,
{
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        match signal.await {
            Ok(()) => {
                info!("Shutdown signal received");
                let _ = tx.send(true);
            }
            Err(e) => {
                warn!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        }
    });
    rx
}

/// Format a percentage or amount with two decimals.
pub fn two_dp(value: rust_decimal::Decimal) -> String {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}
