//! legacy-ipc core: transport-agnostic protocol primitives and error types.
//!
//! This crate defines the wire-level contracts shared by the bridge and by
//! anything that talks to it: the `{type, data}` envelope, the registered
//! message kinds, and the type registry that turns a tag plus raw payload into
//! a typed message. It carries no transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `IpcError`/`Result` so a malformed message
//! from the legacy peer never takes the bridge down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ErrorCode, IpcError, Result};
