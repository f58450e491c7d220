use std::net::SocketAddr;

use serde::Deserialize;
use legacy_ipc_core::error::{IpcError, Result};

/// Port the legacy client connects to.
pub const LEGACY_IPC_PORT: u16 = 45357;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    pub version: u32,

    #[serde(default)]
    pub bridge: BridgeSection,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            bridge: BridgeSection::default(),
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(IpcError::UnsupportedVersion);
        }

        self.bridge.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

impl BridgeSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(64..=64 * 1024 * 1024).contains(&self.max_frame_bytes) {
            return Err(IpcError::InvalidConfig(
                "bridge.max_frame_bytes must be between 64 and 67108864".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            IpcError::InvalidConfig(format!("bridge.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    format!("127.0.0.1:{LEGACY_IPC_PORT}")
}
fn default_max_frame_bytes() -> usize {
    1024 * 1024
}
