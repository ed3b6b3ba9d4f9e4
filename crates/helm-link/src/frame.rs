use anyhow::{ensure, Result};
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

// Request/response framing on the service sockets: u32-BE length + payload.
const MAX_FRAME: u32 = 64 * 1024;

pub async fn write_frame<W: AsyncWrite + Unpin>(w: &mut W, blob: &[u8]) -> Result<()> {
    let len = (blob.len() as u32).to_be_bytes();
    w.write_all(&len).await?;
    w.write_all(blob).await?;
    w.flush().await?;
    Ok(())
}

pub async fn read_frame<R: AsyncRead + Unpin>(r: &mut R) -> Result<Bytes> {
    let mut len = [0u8; 4];
    r.read_exact(&mut len).await?;
    let len = u32::from_be_bytes(len);
    ensure!(len <= MAX_FRAME, "frame too large: {} bytes", len);
    let mut buf = BytesMut::zeroed(len as usize);
    r.read_exact(&mut buf).await?;
    Ok(buf.freeze())
}
