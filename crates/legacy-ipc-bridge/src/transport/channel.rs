//! Channel adapter: framed bidirectional byte stream.
//!
//! The session loop only sees `Channel`; TCP is one implementation, an
//! in-memory duplex pipe is another (used in tests).

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

use legacy_ipc_core::error::Result;

use super::framing::{read_frame, write_frame};

/// Ordered, connection-oriented message channel.
#[async_trait]
pub trait Channel: Send {
    /// Next inbound frame; `None` once the peer has closed the stream.
    async fn receive(&mut self) -> Result<Option<Bytes>>;
    async fn send(&mut self, frame: Bytes) -> Result<()>;
}

/// Length-prefixed frames over any async reader/writer pair.
pub struct FramedChannel<R, W> {
    reader: BufReader<R>,
    writer: W,
    max_frame_bytes: usize,
}

/// Channel over an accepted or connected TCP stream.
pub type TcpChannel = FramedChannel<OwnedReadHalf, OwnedWriteHalf>;

impl<R, W> FramedChannel<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W, max_frame_bytes: usize) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
            max_frame_bytes,
        }
    }
}

impl TcpChannel {
    pub fn from_tcp(stream: TcpStream, max_frame_bytes: usize) -> Self {
        // Small request/reply frames; don't let Nagle hold them back.
        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!(error = %e, "failed to set TCP_NODELAY");
        }
        let (reader, writer) = stream.into_split();
        Self::new(reader, writer, max_frame_bytes)
    }
}

#[async_trait]
impl<R, W> Channel for FramedChannel<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn receive(&mut self) -> Result<Option<Bytes>> {
        read_frame(&mut self.reader, self.max_frame_bytes).await
    }

    async fn send(&mut self, frame: Bytes) -> Result<()> {
        write_frame(&mut self.writer, &frame, self.max_frame_bytes).await
    }
}
