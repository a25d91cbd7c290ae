//! Ctrl-C forwarding into the session's shutdown channel.

use std::future::Future;

use tokio::sync::watch;

/// Raise the shutdown flag once `signal` resolves.
///
/// If the signal cannot be listened for, the sender is held for the rest of
/// the process: receivers treat a closed channel as shutdown.
pub async fn forward_interrupt<F>(signal: F, shutdown: watch::Sender<bool>)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            tracing::info!("Interrupt received, shutting down");
            let _ = shutdown.send(true);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Cannot listen for Ctrl-C, interrupts will not cancel replies");
            std::future::pending::<()>().await;
        }
    }
}
