//! Length-prefixed framing: 4-byte big-endian length prefix + UTF-8 JSON
//! body.
//!
//! Used twice in this crate: over TCP between the front-end and the
//! processing server, and over a child process's stdin/stdout between the
//! processing server and its worker pool. Both reuse the same framing so
//! the wire contract is exercised identically in both places.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::AppError;

/// Reject messages larger than this many bytes.
pub const MAX_FRAME_LEN: u32 = 100_000_000;

/// Encode `message` as a length-prefixed frame.
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, AppError> {
    let body = serde_json::to_vec(message).map_err(|e| AppError::Format(e.to_string()))?;
    let len = u32::try_from(body.len()).map_err(|_| {
        AppError::Framing(format!("message too large to frame: {} bytes", body.len()))
    })?;
    let mut framed = Vec::with_capacity(4 + body.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(&body);
    Ok(framed)
}

/// Write a length-prefixed frame to `writer` and flush it.
pub async fn write_frame<W, T>(writer: &mut W, message: &T) -> Result<(), AppError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let framed = encode(message)?;
    writer
        .write_all(&framed)
        .await
        .map_err(|e| AppError::Framing(e.to_string()))?;
    writer
        .flush()
        .await
        .map_err(|e| AppError::Framing(e.to_string()))
}

/// Read exactly one length-prefixed frame from `reader` and decode it as
/// JSON into `T`. The reader loops internally until all `L` bytes arrive —
/// a short read is not itself a framing error, only EOF before `L` bytes
/// have arrived is.
pub async fn read_frame<R, T>(reader: &mut R) -> Result<T, AppError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut header = [0u8; 4];
    reader
        .read_exact(&mut header)
        .await
        .map_err(|e| AppError::Framing(format!("connection closed reading length: {e}")))?;
    let len = u32::from_be_bytes(header);
    if len == 0 {
        return Err(AppError::Framing("zero-length frame".to_string()));
    }
    if len > MAX_FRAME_LEN {
        return Err(AppError::Framing(format!("frame too large: {len} bytes")));
    }

    let mut body = vec![0u8; len as usize];
    reader
        .read_exact(&mut body)
        .await
        .map_err(|e| AppError::Framing(format!("connection closed reading body: {e}")))?;

    serde_json::from_slice(&body).map_err(|e| AppError::Format(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::io::Cursor;

    #[tokio::test]
    async fn round_trips_arbitrary_json() {
        let msg = json!({"url": "https://example.com", "tasks": {"seo": true}});
        let framed = encode(&msg).unwrap();
        let mut cursor = Cursor::new(framed);
        let decoded: Value = read_frame(&mut cursor).await.unwrap();
        assert_eq!(decoded, msg);
    }

    #[tokio::test]
    async fn rejects_zero_length() {
        let mut cursor = Cursor::new(0u32.to_be_bytes().to_vec());
        let result: Result<Value, _> = read_frame(&mut cursor).await;
        assert!(matches!(result, Err(AppError::Framing(_))));
    }

    #[tokio::test]
    async fn rejects_oversized_length() {
        let mut cursor = Cursor::new((MAX_FRAME_LEN + 1).to_be_bytes().to_vec());
        let result: Result<Value, _> = read_frame(&mut cursor).await;
        assert!(matches!(result, Err(AppError::Framing(_))));
    }

    #[tokio::test]
    async fn rejects_truncated_body() {
        let mut bytes = 10u32.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"short");
        let mut cursor = Cursor::new(bytes);
        let result: Result<Value, _> = read_frame(&mut cursor).await;
        assert!(matches!(result, Err(AppError::Framing(_))));
    }

    #[tokio::test]
    async fn invalid_json_is_format_error() {
        let mut bytes = 4u32.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"nope");
        let mut cursor = Cursor::new(bytes);
        let result: Result<Value, _> = read_frame(&mut cursor).await;
        assert!(matches!(result, Err(AppError::Format(_))));
    }
}
