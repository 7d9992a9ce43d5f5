// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::completion_signaling::CompletionSignaling;
use crate::completion_tally::CompletionTally;
use crate::config::WalkConfig;
use crate::controller::Controller;
use crate::error::SimulationError;
use crate::walker::walker_seed;
use crate::worker_identity::WorkerId;
use crate::worker_runtime::{WalkerTask, WorkerRuntime};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy)]
pub struct SimulationReport {
    pub tally: CompletionTally,
    pub elapsed: Duration,
}

/// Spawns one walker per non-controller ordinal on runtime `R`, then runs
/// the controller on the current task until every walker has reported.
///
/// A walker that fails to spawn aborts the run before the controller starts
/// waiting; handles already created are dropped and left to the runtime.
pub async fn run_simulation<S, R>(
    config: &WalkConfig,
    mut signaling: S,
    shutdown: &CancellationToken,
) -> Result<SimulationReport, SimulationError>
where
    S: CompletionSignaling,
    R: WorkerRuntime<WalkerTask<S::Sender>>,
{
    let start_time = Instant::now();
    let base_seed = config.base_seed();

    let mut handles = Vec::with_capacity(config.walker_count());
    for walker_id in WorkerId::walkers(config.worker_count) {
        let task = WalkerTask {
            walker_id,
            bounds: config.bounds,
            seed: walker_seed(base_seed, walker_id),
            sender: signaling.get_sender(walker_id),
        };
        match R::spawn(task) {
            Ok(handle) => handles.push((walker_id, handle)),
            Err(e) => {
                error!(walker = %walker_id, error = %e, "failed to spawn walker");
                return Err(SimulationError::Spawn {
                    walker_id,
                    reason: e.to_string(),
                });
            }
        }
    }
    debug!(spawned = handles.len(), "walkers started");

    let controller = Controller::from_config(config);
    let result = controller.await_walkers(&mut signaling, shutdown).await;

    // A walker that has signalled may still be exiting; stragglers of an
    // aborted wait are left to the runtime.
    if result.is_ok() {
        for (walker_id, handle) in handles {
            if let Err(e) = R::join(handle).await {
                warn!(walker = %walker_id, error = %e, "walker did not exit cleanly");
            }
        }
    }

    let tally = result?;
    Ok(SimulationReport {
        tally,
        elapsed: start_time.elapsed(),
    })
}
