// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::socket_completion_signaling::SocketCompletionSender;
use random_walk_core::worker_runtime::{WalkerTask, WorkerRuntime};
use std::io;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::level_filters::LevelFilter;

/// Subcommand a spawned child runs to act as a single walker
pub const WALKER_SUBCOMMAND: &str = "walker";

/// Child process that is killed if the handle is dropped before it exits
pub struct AutoKillChild(Child);

impl Drop for AutoKillChild {
    fn drop(&mut self) {
        let _ = self.0.start_kill();
    }
}

/// One OS process per walker: re-executes the current binary in walker mode
/// with the serialized task on the command line. Children log at debug level
/// whenever the controller does; `RUST_LOG` is inherited through the environment.
pub struct ProcessRuntime;

impl WorkerRuntime<WalkerTask<SocketCompletionSender>> for ProcessRuntime {
    type Handle = AutoKillChild;
    type Error = io::Error;

    fn spawn(task: WalkerTask<SocketCompletionSender>) -> Result<Self::Handle, Self::Error> {
        let exe = std::env::current_exe()?;
        let task_json = serde_json::to_string(&task)?;

        let mut command = Command::new(exe);
        command.arg(WALKER_SUBCOMMAND).arg("--task").arg(task_json);
        if LevelFilter::current() >= LevelFilter::DEBUG {
            command.arg("--verbose");
        }

        let child = command
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;

        Ok(AutoKillChild(child))
    }

    async fn join(mut handle: Self::Handle) -> Result<(), Self::Error> {
        let status = handle.0.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!("walker process exited with {}", status)))
        }
    }
}
