//! Protocol modules.
//!
//! - `envelope`: the outer `{type, data}` JSON envelope (lazy `RawValue` data).
//! - `messages`: the closed set of message kinds and their payload schemas.
//! - `registry`: tag -> schema lookup used to decode raw payloads.
//!
//! All parsers are panic-free: malformed input is reported as `IpcError`.

pub mod envelope;
pub mod messages;
pub mod registry;

pub use envelope::{decode_envelope, encode_envelope, encode_message, Envelope};
pub use messages::{
    DifficultyCalculationRequest, DifficultyCalculationResponse, IpcMessage, MessageKind,
};
pub use registry::TypeRegistry;
