//! Type registry: tag -> payload schema.
//!
//! Built once at startup, read-only afterwards. Shared across connections
//! behind an `Arc` without locking.

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::value::RawValue;

use crate::error::{IpcError, Result};
use crate::protocol::envelope::{encode_message, Envelope};
use crate::protocol::messages::{
    DifficultyCalculationRequest, DifficultyCalculationResponse, IpcMessage, MessageKind,
};

type DecodeFn = fn(&RawValue) -> serde_json::Result<IpcMessage>;

fn decode_kind<M: MessageKind>(raw: &RawValue) -> serde_json::Result<IpcMessage> {
    serde_json::from_str::<M>(raw.get()).map(Into::into)
}

/// Registry of known message kinds.
#[derive(Default)]
pub struct TypeRegistry {
    schemas: HashMap<&'static str, DecodeFn>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every kind the legacy peer speaks.
    pub fn legacy() -> Result<Self> {
        let mut reg = Self::new();
        reg.register::<DifficultyCalculationRequest>()?;
        reg.register::<DifficultyCalculationResponse>()?;
        Ok(reg)
    }

    /// Register `M` under `M::TYPE`. Each tag may be registered once.
    pub fn register<M: MessageKind>(&mut self) -> Result<()> {
        if self.schemas.contains_key(M::TYPE) {
            return Err(IpcError::DuplicateType(M::TYPE));
        }
        self.schemas.insert(M::TYPE, decode_kind::<M>);
        Ok(())
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.schemas.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.schemas.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    /// Decode a raw payload using the schema registered for `tag`.
    pub fn decode_payload(&self, tag: &str, raw: &RawValue) -> Result<IpcMessage> {
        let decode = self
            .schemas
            .get(tag)
            .ok_or_else(|| IpcError::UnknownType(tag.to_owned()))?;
        decode(raw).map_err(|e| IpcError::SchemaMismatch {
            tag: tag.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Decode the payload of an already-parsed envelope.
    pub fn decode(&self, env: &Envelope) -> Result<IpcMessage> {
        self.decode_payload(&env.msg_type, &env.data)
    }

    /// Tag and encode an outgoing message. The tag must be registered.
    pub fn encode(&self, msg: &IpcMessage) -> Result<Bytes> {
        let tag = msg.tag();
        if !self.is_registered(tag) {
            return Err(IpcError::UnknownType(tag.to_owned()));
        }
        encode_message(msg)
    }
}
