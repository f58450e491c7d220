//! Top-level facade crate for the legacy IPC bridge.
//!
//! Re-exports the protocol core and the bridge library so users can depend on a single crate.

pub mod core {
    pub use legacy_ipc_core::*;
}

pub mod bridge {
    pub use legacy_ipc_bridge::*;
}
