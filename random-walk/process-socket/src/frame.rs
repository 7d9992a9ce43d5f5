// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Length-prefixed JSON framing: a big-endian u32 byte count followed by
//! the serialized message.

use random_walk_core::error::SignalError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Completion frames are a few dozen bytes; anything larger is garbage
pub const MAX_FRAME_LEN: usize = 64 * 1024;

pub async fn write_frame<W, T>(writer: &mut W, message: &T) -> Result<(), SignalError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let serialized = serde_json::to_vec(message)?;
    let len = serialized.len() as u32;
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(&serialized).await?;
    writer.flush().await?;
    Ok(())
}

pub async fn read_frame<R, T>(reader: &mut R) -> Result<T, SignalError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut len_bytes = [0u8; 4];
    reader.read_exact(&mut len_bytes).await?;
    let len = u32::from_be_bytes(len_bytes) as usize;
    if len > MAX_FRAME_LEN {
        return Err(SignalError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("frame of {} bytes exceeds limit", len),
        )));
    }

    let mut buffer = vec![0u8; len];
    reader.read_exact(&mut buffer).await?;
    Ok(serde_json::from_slice(&buffer)?)
}
