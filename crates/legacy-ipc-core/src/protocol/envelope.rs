//! Envelope codec (JSON).
//!
//! The envelope stores `data` as `RawValue`: the codec only checks the outer
//! `{type, data}` shape and leaves payload parsing to the type registry.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{IpcError, Result};
use crate::protocol::messages::IpcMessage;

/// Outer envelope exchanged with the legacy peer.
///
/// Field names are part of the interop contract: exactly `type` and `data`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    /// Message type tag (field name is `type` in JSON).
    #[serde(rename = "type")]
    pub msg_type: String,
    /// Payload, stored as raw JSON (lazy parsing).
    pub data: Box<RawValue>,
}

impl Envelope {
    /// Wrap a serializable payload under `tag`.
    pub fn new<T: Serialize + ?Sized>(tag: &str, payload: &T) -> Result<Self> {
        if tag.is_empty() {
            return Err(IpcError::Encode("envelope type must not be empty".into()));
        }
        let data = serde_json::value::to_raw_value(payload)
            .map_err(|e| IpcError::Encode(format!("{tag} payload: {e}")))?;
        Ok(Self {
            msg_type: tag.to_owned(),
            data,
        })
    }

    /// Raw payload text, exactly as received.
    pub fn raw_data(&self) -> &str {
        self.data.get()
    }

    /// Serialize the envelope to a transport buffer.
    pub fn to_bytes(&self) -> Result<Bytes> {
        serde_json::to_vec(self)
            .map(Bytes::from)
            .map_err(|e| IpcError::Encode(format!("envelope: {e}")))
    }
}

impl PartialEq for Envelope {
    fn eq(&self, other: &Self) -> bool {
        self.msg_type == other.msg_type && self.data.get() == other.data.get()
    }
}

impl Eq for Envelope {}

/// Decode the outer envelope. The payload is not inspected.
pub fn decode_envelope(buf: &[u8]) -> Result<Envelope> {
    let env: Envelope = serde_json::from_slice(buf)
        .map_err(|e| IpcError::MalformedEnvelope(format!("invalid envelope json: {e}")))?;
    if env.msg_type.is_empty() {
        return Err(IpcError::MalformedEnvelope("envelope type is empty".into()));
    }
    Ok(env)
}

/// Encode `payload` under `tag` into a transport buffer.
pub fn encode_envelope<T: Serialize + ?Sized>(tag: &str, payload: &T) -> Result<Bytes> {
    Envelope::new(tag, payload)?.to_bytes()
}

/// Encode a typed message under its own tag.
pub fn encode_message(msg: &IpcMessage) -> Result<Bytes> {
    match msg {
        IpcMessage::DifficultyCalculationRequest(req) => encode_envelope(msg.tag(), req),
        IpcMessage::DifficultyCalculationResponse(res) => encode_envelope(msg.tag(), res),
    }
}
