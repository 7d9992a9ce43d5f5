// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use random_walk_core::worker_runtime::{WorkerRuntime, WorkerTask};
use std::error::Error;
use tokio::task::{self, JoinHandle};

pub type TaskError = Box<dyn Error + Send + Sync>;

/// Tokio task-based runtime
pub struct TokioRuntime;

impl<T, O, E> WorkerRuntime<T> for TokioRuntime
where
    T: WorkerTask<Output = Result<O, E>>,
    O: Send + 'static,
    E: Error + Send + Sync + 'static,
{
    type Handle = JoinHandle<Result<O, E>>;
    type Error = TaskError;

    fn spawn(task: T) -> Result<Self::Handle, Self::Error> {
        Ok(task::spawn(task.run()))
    }

    async fn join(handle: Self::Handle) -> Result<(), Self::Error> {
        handle.await?.map(|_| ()).map_err(Into::into)
    }
}
