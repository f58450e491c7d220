//! legacy-ipc bridge binary.
//!
//! - Config from `$LEGACY_IPC_CONFIG` (default `legacy-ipc.yaml`, optional)
//! - TCP listener, one session task per legacy client connection
//! - Graceful stop on Ctrl+C / SIGTERM

use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use legacy_ipc_bridge::{app_state::AppState, config, transport::server};
use legacy_ipc_core::error::Result;

const CONFIG_ENV: &str = "LEGACY_IPC_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "legacy-ipc.yaml";

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!(code = e.code().as_str(), error = %e, "legacy-ipc-bridge failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // An explicitly named config must exist; the default one may not.
    let cfg = match std::env::var(CONFIG_ENV) {
        Ok(path) => config::load_from_file(&path)?,
        Err(_) => config::load_or_default(DEFAULT_CONFIG_PATH)?,
    };
    let listen = cfg.bridge.listen_addr()?;

    let state = AppState::new(cfg)?;

    let listener = TcpListener::bind(listen).await?;
    tracing::info!(%listen, "legacy-ipc-bridge listening");

    server::serve(listener, state, server::shutdown_signal()).await
}
