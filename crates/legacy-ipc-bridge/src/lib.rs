//! legacy-ipc bridge library entry.
//!
//! Wires the channel adapter, the receive pipeline, the dispatcher and the
//! built-in difficulty handler into a TCP bridge for legacy clients. Used by
//! the binary (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod client;
pub mod config;
pub mod difficulty;
pub mod dispatch;
pub mod services;
pub mod transport;
