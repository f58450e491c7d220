//! Shared error type across legacy-ipc crates.

use thiserror::Error;

/// Stable error codes (used as structured log fields and in test vectors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Outer envelope could not be parsed.
    MalformedEnvelope,
    /// Tag has no registered schema.
    UnknownType,
    /// Payload does not fit the registered schema.
    SchemaMismatch,
    /// Outgoing value could not be serialized.
    Encode,
    /// Frame length exceeds the configured maximum.
    FrameTooLarge,
    /// Peer closed the stream.
    ConnectionClosed,
    /// Underlying I/O failure.
    Io,
    /// Invalid configuration.
    InvalidConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Same tag registered twice.
    DuplicateType,
}

impl ErrorCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MalformedEnvelope => "MALFORMED_ENVELOPE",
            ErrorCode::UnknownType => "UNKNOWN_TYPE",
            ErrorCode::SchemaMismatch => "SCHEMA_MISMATCH",
            ErrorCode::Encode => "ENCODE",
            ErrorCode::FrameTooLarge => "FRAME_TOO_LARGE",
            ErrorCode::ConnectionClosed => "CONNECTION_CLOSED",
            ErrorCode::Io => "IO",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::DuplicateType => "DUPLICATE_TYPE",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, IpcError>;

/// Unified error type used by core and bridge.
#[derive(Debug, Error)]
pub enum IpcError {
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),
    #[error("unknown type: {0}")]
    UnknownType(String),
    #[error("schema mismatch for {tag}: {reason}")]
    SchemaMismatch { tag: String, reason: String },
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("frame too large: {len} bytes (max {max})")]
    FrameTooLarge { len: usize, max: usize },
    #[error("connection closed")]
    ConnectionClosed,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("duplicate type registration: {0}")]
    DuplicateType(&'static str),
}

impl IpcError {
    /// Map to a stable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            IpcError::MalformedEnvelope(_) => ErrorCode::MalformedEnvelope,
            IpcError::UnknownType(_) => ErrorCode::UnknownType,
            IpcError::SchemaMismatch { .. } => ErrorCode::SchemaMismatch,
            IpcError::Encode(_) => ErrorCode::Encode,
            IpcError::FrameTooLarge { .. } => ErrorCode::FrameTooLarge,
            IpcError::ConnectionClosed => ErrorCode::ConnectionClosed,
            IpcError::Io(_) => ErrorCode::Io,
            IpcError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            IpcError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            IpcError::DuplicateType(_) => ErrorCode::DuplicateType,
        }
    }

    /// Whether the error leaves the channel unusable.
    ///
    /// Codec and registry errors only drop the current message.
    pub fn is_connection_fatal(&self) -> bool {
        matches!(
            self,
            IpcError::FrameTooLarge { .. } | IpcError::ConnectionClosed | IpcError::Io(_)
        )
    }
}
