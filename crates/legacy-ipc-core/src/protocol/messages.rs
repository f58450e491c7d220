//! Registered message kinds.
//!
//! Each kind is a plain serde struct registered under its own type name.
//! `IpcMessage` is the closed set of kinds the bridge understands; adding a
//! kind means adding a struct, a `MessageKind` impl and a variant here.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A payload schema that can travel inside an envelope.
pub trait MessageKind: Serialize + DeserializeOwned + Into<IpcMessage> + Send + 'static {
    /// Tag written to the envelope's `type` field.
    const TYPE: &'static str;
}

/// Ask the engine for a chart's star rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyCalculationRequest {
    /// Rule variant: 0..=3. Anything else is rejected by the handler.
    pub ruleset_id: i32,
    /// Legacy modifier bitflag.
    pub mods: i32,
    /// Path to the chart file.
    pub beatmap_file: String,
}

impl MessageKind for DifficultyCalculationRequest {
    const TYPE: &'static str = "DifficultyCalculationRequest";
}

/// Reply to a `DifficultyCalculationRequest`.
///
/// `star_rating == 0.0` doubles as the "calculation failed" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyCalculationResponse {
    pub star_rating: f64,
}

impl MessageKind for DifficultyCalculationResponse {
    const TYPE: &'static str = "DifficultyCalculationResponse";
}

/// Typed message after payload decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum IpcMessage {
    DifficultyCalculationRequest(DifficultyCalculationRequest),
    DifficultyCalculationResponse(DifficultyCalculationResponse),
}

impl IpcMessage {
    /// Tag this message is encoded under.
    pub fn tag(&self) -> &'static str {
        match self {
            IpcMessage::DifficultyCalculationRequest(_) => DifficultyCalculationRequest::TYPE,
            IpcMessage::DifficultyCalculationResponse(_) => DifficultyCalculationResponse::TYPE,
        }
    }
}

impl From<DifficultyCalculationRequest> for IpcMessage {
    fn from(v: DifficultyCalculationRequest) -> Self {
        IpcMessage::DifficultyCalculationRequest(v)
    }
}

impl From<DifficultyCalculationResponse> for IpcMessage {
    fn from(v: DifficultyCalculationResponse) -> Self {
        IpcMessage::DifficultyCalculationResponse(v)
    }
}
