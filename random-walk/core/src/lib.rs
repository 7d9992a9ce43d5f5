// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod completion_signaling;
pub mod completion_tally;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod run_args;
pub mod simulation;
pub mod walker;
pub mod worker_identity;
pub mod worker_runtime;
