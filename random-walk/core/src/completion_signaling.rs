// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::SignalError;
use crate::worker_identity::WorkerId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// One-shot message a walker sends to the controller when its walk is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSignal {
    pub from: WorkerId,
}

impl CompletionSignal {
    pub fn new(from: WorkerId) -> Self {
        Self { from }
    }
}

/// Walker side of the completion transport
#[async_trait]
pub trait CompletionSender: Send + Sync + Clone {
    /// Deliver `from`'s completion signal to the controller.
    /// Does not wait for the controller to receive it.
    async fn send_completion(&self, from: WorkerId) -> Result<(), SignalError>;
}

/// Trait for abstracting the walker-to-controller fan-in channel
/// This allows different implementations for tasks, threads, and processes
pub trait CompletionSignaling: Send {
    /// The sender type handed to each walker
    type Sender: CompletionSender + 'static;

    /// Get the sender a specific walker uses to reach the controller
    fn get_sender(&self, walker_id: WorkerId) -> Self::Sender;

    /// Wait for the next signal from any walker, whichever arrives first
    /// Returns None if the transport is closed and no more signals can arrive
    fn receive_any_completion(
        &mut self,
    ) -> impl Future<Output = Option<CompletionSignal>> + Send;
}
