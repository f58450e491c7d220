//! Bridge config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use legacy_ipc_core::error::{IpcError, Result};

pub use schema::{BridgeConfig, BridgeSection, LEGACY_IPC_PORT};

pub fn load_from_file(path: &str) -> Result<BridgeConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| IpcError::InvalidConfig(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

/// Like `load_from_file`, but a missing file yields the built-in defaults.
pub fn load_or_default(path: &str) -> Result<BridgeConfig> {
    if !Path::new(path).exists() {
        tracing::info!(%path, "config file not found, using defaults");
        return Ok(BridgeConfig::default());
    }
    load_from_file(path)
}

pub fn load_from_str(s: &str) -> Result<BridgeConfig> {
    let cfg: BridgeConfig = serde_yaml::from_str(s)
        .map_err(|e| IpcError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
