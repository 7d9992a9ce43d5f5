// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::completion_signaling::CompletionSender;
use crate::config::WalkBounds;
use crate::error::SignalError;
use crate::walker::{run_walker, WalkOutcome};
use crate::worker_identity::WorkerId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;

/// Defines a unit of work that can be executed
#[async_trait]
pub trait WorkerTask: Send + 'static {
    type Output;
    async fn run(self) -> Self::Output;
}

/// Trait for abstracting worker runtime (tasks, threads, processes)
pub trait WorkerRuntime<T: WorkerTask>: Send + 'static {
    type Handle: Send;
    type Error: Display + Send;

    /// Spawn a worker task/thread/process
    fn spawn(task: T) -> Result<Self::Handle, Self::Error>;

    /// Wait for the worker to complete
    fn join(handle: Self::Handle) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Everything a walker needs to run in isolation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerTask<S> {
    pub walker_id: WorkerId,
    pub bounds: WalkBounds,
    pub seed: u64,
    pub sender: S,
}

#[async_trait]
impl<S> WorkerTask for WalkerTask<S>
where
    S: CompletionSender + 'static,
{
    type Output = Result<WalkOutcome, SignalError>;

    async fn run(self) -> Self::Output {
        run_walker(self.walker_id, self.bounds, self.seed, &self.sender).await
    }
}
