// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::completion_tally::CompletionTally;
use crate::worker_identity::WorkerId;
use thiserror::Error;

/// Configuration rejected at the boundary, before any walker starts
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("max steps must be positive")]
    ZeroMaxSteps,

    #[error("worker count must be at least 1 (the controller)")]
    ZeroWorkerCount,

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure to deliver a completion signal
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("controller is no longer receiving completion signals")]
    Disconnected,

    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed completion signal: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Controller wait ended before every walker reported
#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("timed out with {} of {} walkers finished", .tally.received(), .tally.expected())]
    TimedOut { tally: CompletionTally },

    #[error("interrupted with {} of {} walkers finished", .tally.received(), .tally.expected())]
    Interrupted { tally: CompletionTally },

    #[error("transport closed with {} of {} walkers finished", .tally.received(), .tally.expected())]
    TransportClosed { tally: CompletionTally },
}

impl ControllerError {
    pub fn tally(&self) -> &CompletionTally {
        match self {
            ControllerError::TimedOut { tally }
            | ControllerError::Interrupted { tally }
            | ControllerError::TransportClosed { tally } => tally,
        }
    }
}

/// A run that could not be started or did not complete
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("failed to spawn walker {walker_id}: {reason}")]
    Spawn { walker_id: WorkerId, reason: String },

    #[error(transparent)]
    Controller(#[from] ControllerError),
}
