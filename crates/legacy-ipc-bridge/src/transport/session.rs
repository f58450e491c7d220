//! Per-connection receive pipeline.
//!
//! `Idle -> EnvelopeDecoding -> PayloadDecoding -> Dispatching ->
//! ResponseEncoding -> Idle`. A codec or registry failure drops the current
//! message only; the loop keeps reading. Messages are handled strictly one at
//! a time, so replies leave in request order.
//!
//! Every log event is emitted under the connection's span, which the caller
//! passes in.

use bytes::Bytes;
use tracing::Span;

use legacy_ipc_core::error::{IpcError, Result};
use legacy_ipc_core::protocol::decode_envelope;

use crate::app_state::AppState;
use crate::transport::channel::Channel;

/// Pipeline stage a message was dropped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    EnvelopeDecoding,
    PayloadDecoding,
    Dispatching,
    ResponseEncoding,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::EnvelopeDecoding => "envelope_decoding",
            Stage::PayloadDecoding => "payload_decoding",
            Stage::Dispatching => "dispatching",
            Stage::ResponseEncoding => "response_encoding",
        }
    }
}

fn log_drop(span: &Span, stage: Stage, err: &IpcError, raw: Option<&str>) {
    let code = err.code().as_str();
    match err {
        IpcError::UnknownType(tag) => {
            tracing::debug!(parent: span, stage = stage.as_str(), code, %tag, "unknown message type, dropped");
        }
        IpcError::SchemaMismatch { .. } => {
            tracing::warn!(parent: span, stage = stage.as_str(), code, raw = raw.unwrap_or(""), error = %err, "message dropped");
        }
        _ => {
            tracing::warn!(parent: span, stage = stage.as_str(), code, error = %err, "message dropped");
        }
    }
}

/// Run one inbound frame through the pipeline. Returns the reply frame, if any.
pub async fn process_frame(app: &AppState, frame: &[u8], span: &Span) -> Option<Bytes> {
    tracing::trace!(parent: span, len = frame.len(), "processing message");

    let env = match decode_envelope(frame) {
        Ok(env) => env,
        Err(e) => {
            log_drop(span, Stage::EnvelopeDecoding, &e, None);
            return None;
        }
    };

    let msg = match app.registry().decode(&env) {
        Ok(msg) => msg,
        Err(e) => {
            log_drop(span, Stage::PayloadDecoding, &e, Some(env.raw_data()));
            return None;
        }
    };

    let reply = app.dispatcher().dispatch(msg, span).await?;

    match app.registry().encode(&reply) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log_drop(span, Stage::ResponseEncoding, &e, None);
            None
        }
    }
}

/// Serve one connection until the peer closes it or the channel fails.
pub async fn run_session<C: Channel>(app: AppState, mut channel: C, span: Span) -> Result<()> {
    tracing::debug!(parent: &span, "session started");

    while let Some(frame) = channel.receive().await? {
        if let Some(reply) = process_frame(&app, &frame, &span).await {
            channel.send(reply).await?;
        }
    }

    tracing::debug!(parent: &span, "peer closed connection");
    Ok(())
}
