//! Interrupt handling and graceful shutdown.

use log::{info, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancels `cancel` on the first Ctrl-C.
///
/// The search checks the token between records, so an interrupt stops the
/// run early while keeping the mail servers found so far. The listener exits
/// on its own once `cancel` fires for any other reason.
pub fn spawn_interrupt_listener(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    info!("Interrupted, finishing up...");
                    cancel.cancel();
                }
                Err(e) => warn!("Failed to listen for Ctrl-C: {e}"),
            },
            _ = cancel.cancelled() => {}
        }
    })
}

/// Stops the interrupt listener once the run is over.
pub async fn shutdown_gracefully(listener: JoinHandle<()>) {
    listener.abort();
    // A cancelled JoinError is the expected outcome of abort()
    let _ = listener.await;
}
