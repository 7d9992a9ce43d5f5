// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use random_walk_core::completion_signaling::{
    CompletionSender, CompletionSignal, CompletionSignaling,
};
use random_walk_core::error::SignalError;
use random_walk_core::worker_identity::WorkerId;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;

/// In-memory fan-in: every walker holds a clone of one unbounded sender,
/// the controller drains the single receiver.
///
/// The signaling keeps its own sender alive, so the stream never ends
/// while the controller is waiting.
pub struct ChannelCompletionSignaling {
    tx: UnboundedSender<CompletionSignal>,
    signals: UnboundedReceiverStream<CompletionSignal>,
}

impl ChannelCompletionSignaling {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            signals: UnboundedReceiverStream::new(rx),
        }
    }
}

impl Default for ChannelCompletionSignaling {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionSignaling for ChannelCompletionSignaling {
    type Sender = ChannelCompletionSender;

    fn get_sender(&self, _walker_id: WorkerId) -> Self::Sender {
        ChannelCompletionSender {
            tx: self.tx.clone(),
        }
    }

    async fn receive_any_completion(&mut self) -> Option<CompletionSignal> {
        self.signals.next().await
    }
}

#[derive(Clone)]
pub struct ChannelCompletionSender {
    tx: UnboundedSender<CompletionSignal>,
}

#[async_trait]
impl CompletionSender for ChannelCompletionSender {
    async fn send_completion(&self, from: WorkerId) -> Result<(), SignalError> {
        self.tx
            .send(CompletionSignal::new(from))
            .map_err(|_| SignalError::Disconnected)
    }
}
