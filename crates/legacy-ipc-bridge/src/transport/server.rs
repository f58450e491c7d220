//! TCP accept loop.
//!
//! One task per connection; connections share nothing but the read-only
//! `AppState`.

use std::future::Future;

use tokio::net::TcpListener;
use tokio::time::Duration;

use legacy_ipc_core::error::Result;

use crate::app_state::AppState;
use crate::transport::channel::TcpChannel;
use crate::transport::session::run_session;

/// Accept connections until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut conn_id: u64 = 0;

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("shutdown requested, no longer accepting connections");
                break;
            }

            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(v) => v,
                    Err(e) => {
                        tracing::warn!(error = %e, "accept failed");
                        // e.g. fd exhaustion; back off instead of spinning
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        continue;
                    }
                };

                conn_id += 1;
                let span = tracing::info_span!("conn", id = conn_id, %peer);
                let channel = TcpChannel::from_tcp(stream, app.cfg().bridge.max_frame_bytes);
                let app = app.clone();

                tokio::spawn(async move {
                    match run_session(app, channel, span.clone()).await {
                        Ok(()) => tracing::debug!(parent: &span, "connection closed"),
                        Err(e) => tracing::warn!(
                            parent: &span,
                            code = e.code().as_str(),
                            error = %e,
                            "connection aborted"
                        ),
                    }
                });
            }
        }
    }

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
