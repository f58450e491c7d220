//! Client side of the bridge: speaks the same framing and envelopes.

use std::time::Duration;

use bytes::Bytes;
use tokio::net::{TcpStream, ToSocketAddrs};

use legacy_ipc_core::error::{IpcError, Result};
use legacy_ipc_core::protocol::{
    decode_envelope, DifficultyCalculationRequest, DifficultyCalculationResponse, IpcMessage,
    TypeRegistry,
};

use crate::transport::channel::{Channel, TcpChannel};

/// One connection to the bridge.
///
/// Replies carry no correlation id, so they are matched to requests purely by
/// order. A `request` that times out leaves the stream in an unknown state
/// (a late reply may still arrive, or a frame may be half read). The client
/// is then poisoned: every later call fails with `ConnectionClosed` and the
/// caller has to reconnect.
pub struct BridgeClient<C: Channel = TcpChannel> {
    channel: C,
    registry: TypeRegistry,
    poisoned: bool,
}

impl BridgeClient<TcpChannel> {
    pub async fn connect<A: ToSocketAddrs>(addr: A, max_frame_bytes: usize) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Self::new(TcpChannel::from_tcp(stream, max_frame_bytes))
    }
}

impl<C: Channel> BridgeClient<C> {
    pub fn new(channel: C) -> Result<Self> {
        Ok(Self {
            channel,
            registry: TypeRegistry::legacy()?,
            poisoned: false,
        })
    }

    /// Whether a timed-out request made this client unusable.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.poisoned {
            return Err(IpcError::ConnectionClosed);
        }
        Ok(())
    }

    pub async fn send(&mut self, msg: &IpcMessage) -> Result<()> {
        self.ensure_usable()?;
        let frame = self.registry.encode(msg)?;
        self.channel.send(frame).await
    }

    /// Send an already-encoded frame as is.
    pub async fn send_raw(&mut self, frame: Bytes) -> Result<()> {
        self.ensure_usable()?;
        self.channel.send(frame).await
    }

    /// Next typed message, or `None` once the bridge closed the connection.
    ///
    /// Not cancel-safe: dropping this future mid-frame desynchronizes the
    /// stream. Use `request` for bounded waits.
    pub async fn receive(&mut self) -> Result<Option<IpcMessage>> {
        self.ensure_usable()?;
        let Some(frame) = self.channel.receive().await? else {
            return Ok(None);
        };
        let env = decode_envelope(&frame)?;
        self.registry.decode(&env).map(Some)
    }

    /// Send `msg` and wait up to `timeout` for a reply.
    ///
    /// `Ok(None)` if nothing came back in time (the bridge sends nothing for
    /// messages it drops) or the connection closed. A timeout poisons the
    /// client.
    pub async fn request(&mut self, msg: &IpcMessage, timeout: Duration) -> Result<Option<IpcMessage>> {
        self.send(msg).await?;
        match tokio::time::timeout(timeout, self.receive()).await {
            Ok(res) => res,
            Err(_) => {
                self.poisoned = true;
                Ok(None)
            }
        }
    }

    pub async fn calculate_difficulty(
        &mut self,
        req: DifficultyCalculationRequest,
        timeout: Duration,
    ) -> Result<Option<DifficultyCalculationResponse>> {
        match self.request(&req.into(), timeout).await? {
            Some(IpcMessage::DifficultyCalculationResponse(res)) => Ok(Some(res)),
            Some(other) => Err(IpcError::SchemaMismatch {
                tag: other.tag().to_owned(),
                reason: "expected DifficultyCalculationResponse".into(),
            }),
            None => Ok(None),
        }
    }
}
