use std::future::Future;
use std::io;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Cancel `token` on Ctrl+C, or SIGTERM on unix.
pub async fn cancel_on_signal(token: CancellationToken) {
    wait_for_signal().await;
    token.cancel();
}

async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                let ctrl_c = interrupted(tokio::signal::ctrl_c());
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                interrupted(tokio::signal::ctrl_c()).await;
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        interrupted(tokio::signal::ctrl_c()).await;
        info!("Received Ctrl+C, shutting down...");
    }
}

/// Resolves only when `ctrl_c` reports a real interrupt. A listener that
/// fails to install never resolves, so it cannot trigger a shutdown.
async fn interrupted<F>(ctrl_c: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = ctrl_c.await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn listener_error_is_not_an_interrupt() {
        let failing = async { Err::<(), _>(io::Error::other("no signal driver")) };
        let waited = tokio::time::timeout(Duration::from_millis(50), interrupted(failing)).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn real_interrupt_resolves() {
        let ready = async { Ok::<(), io::Error>(()) };
        let waited = tokio::time::timeout(Duration::from_millis(50), interrupted(ready)).await;
        assert!(waited.is_ok());
    }
}
