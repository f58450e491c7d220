//! Length-prefixed framing used by the legacy peer.
//!
//! # Wire Format
//!
//! ```text
//! [u32 little-endian body length][body bytes]
//! ```
//!
//! Clean EOF before a frame starts is reported as `Ok(None)`. EOF in the
//! middle of a frame is `ConnectionClosed`.

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use legacy_ipc_core::error::{IpcError, Result};

/// Size of the length prefix.
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// Read one frame body.
pub async fn read_frame<R>(reader: &mut R, max_frame_bytes: usize) -> Result<Option<Bytes>>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; LENGTH_PREFIX_BYTES];
    let mut filled = 0;
    while filled < prefix.len() {
        let n = reader.read(&mut prefix[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(IpcError::ConnectionClosed);
        }
        filled += n;
    }

    let len = u32::from_le_bytes(prefix) as usize;
    if len > max_frame_bytes {
        return Err(IpcError::FrameTooLarge {
            len,
            max: max_frame_bytes,
        });
    }

    let mut body = BytesMut::zeroed(len);
    reader.read_exact(&mut body).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            IpcError::ConnectionClosed
        } else {
            IpcError::Io(e)
        }
    })?;

    Ok(Some(body.freeze()))
}

/// Write one frame and flush.
pub async fn write_frame<W>(writer: &mut W, body: &[u8], max_frame_bytes: usize) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let len = u32::try_from(body.len())
        .ok()
        .filter(|len| *len as usize <= max_frame_bytes)
        .ok_or(IpcError::FrameTooLarge {
            len: body.len(),
            max: max_frame_bytes,
        })?;

    writer.write_all(&len.to_le_bytes()).await?;
    writer.write_all(body).await?;
    writer.flush().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;

    #[tokio::test]
    async fn frame_roundtrip_over_duplex() {
        let (mut a, mut b) = tokio::io::duplex(256);
        write_frame(&mut a, b"{\"type\":\"x\",\"data\":1}", 1024).await.unwrap();
        write_frame(&mut a, b"", 1024).await.unwrap();
        drop(a);

        let first = read_frame(&mut b, 1024).await.unwrap().unwrap();
        assert_eq!(&first[..], b"{\"type\":\"x\",\"data\":1}");
        let empty = read_frame(&mut b, 1024).await.unwrap().unwrap();
        assert!(empty.is_empty());
        assert!(read_frame(&mut b, 1024).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn prefix_is_little_endian() {
        let mut out = Vec::new();
        write_frame(&mut out, b"abc", 16).await.unwrap();
        assert_eq!(out, vec![3, 0, 0, 0, b'a', b'b', b'c']);
    }

    #[tokio::test]
    async fn oversized_frame_is_rejected() {
        let mut input: &[u8] = &[0xff, 0xff, 0x00, 0x00, 1, 2, 3];
        let err = read_frame(&mut input, 1024).await.expect_err("must fail");
        assert!(matches!(err, IpcError::FrameTooLarge { len: 0xffff, max: 1024 }));

        let mut out = Vec::new();
        let err = write_frame(&mut out, &[0u8; 32], 16).await.expect_err("must fail");
        assert!(err.is_connection_fatal());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn truncated_frame_is_connection_closed() {
        let mut short_prefix: &[u8] = &[5, 0];
        let err = read_frame(&mut short_prefix, 1024).await.expect_err("must fail");
        assert!(matches!(err, IpcError::ConnectionClosed));

        let mut short_body: &[u8] = &[5, 0, 0, 0, b'a', b'b'];
        let err = read_frame(&mut short_body, 1024).await.expect_err("must fail");
        assert!(matches!(err, IpcError::ConnectionClosed));
    }
}
