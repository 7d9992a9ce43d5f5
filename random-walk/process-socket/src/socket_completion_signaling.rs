// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::frame::{read_frame, write_frame};
use async_trait::async_trait;
use random_walk_core::completion_signaling::{
    CompletionSender, CompletionSignal, CompletionSignaling,
};
use random_walk_core::error::SignalError;
use random_walk_core::worker_identity::WorkerId;
use serde::{Deserialize, Serialize};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::task::JoinSet;
use tokio::time;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_stream::StreamExt;
use tracing::warn;

/// A connection that does not deliver a whole frame within this window is dropped
const FRAME_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Socket-based completion signaling.
///
/// The controller listens on a single address; every walker connects, writes
/// one framed `CompletionSignal`, and disconnects. Each accepted connection is
/// read on its own task, so whichever frame completes first is counted first
/// and a stalled connection holds up no one else.
pub struct SocketCompletionSignaling {
    local_addr: SocketAddr,
    connections: TcpListenerStream,
    listening: bool,
    pending_reads: JoinSet<Option<CompletionSignal>>,
}

impl SocketCompletionSignaling {
    pub async fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        Ok(Self {
            local_addr,
            connections: TcpListenerStream::new(listener),
            listening: true,
            pending_reads: JoinSet::new(),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl CompletionSignaling for SocketCompletionSignaling {
    type Sender = SocketCompletionSender;

    fn get_sender(&self, _walker_id: WorkerId) -> Self::Sender {
        SocketCompletionSender {
            controller_addr: self.local_addr,
        }
    }

    async fn receive_any_completion(&mut self) -> Option<CompletionSignal> {
        loop {
            tokio::select! {
                connection = self.connections.next(), if self.listening => match connection {
                    Some(Ok(stream)) => {
                        self.pending_reads.spawn(read_signal(stream));
                    }
                    Some(Err(e)) => warn!(error = %e, "failed to accept completion connection"),
                    None => self.listening = false,
                },
                Some(read) = self.pending_reads.join_next() => match read {
                    Ok(Some(signal)) => return Some(signal),
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "completion read task failed"),
                },
                else => return None,
            }
        }
    }
}

async fn read_signal(mut stream: TcpStream) -> Option<CompletionSignal> {
    match time::timeout(FRAME_READ_TIMEOUT, read_frame(&mut stream)).await {
        Ok(Ok(signal)) => Some(signal),
        Ok(Err(e)) => {
            warn!(error = %e, "discarding malformed completion frame");
            None
        }
        Err(_) => {
            warn!("completion connection sent no frame in time");
            None
        }
    }
}

/// Walker-side handle: the controller's listening address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocketCompletionSender {
    controller_addr: SocketAddr,
}

impl SocketCompletionSender {
    pub fn new(controller_addr: SocketAddr) -> Self {
        Self { controller_addr }
    }
}

#[async_trait]
impl CompletionSender for SocketCompletionSender {
    async fn send_completion(&self, from: WorkerId) -> Result<(), SignalError> {
        let mut stream = TcpStream::connect(self.controller_addr)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::ConnectionRefused => SignalError::Disconnected,
                _ => SignalError::Io(e),
            })?;
        write_frame(&mut stream, &CompletionSignal::new(from)).await
    }
}
