// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::completion_signaling::CompletionSignaling;
use crate::completion_tally::CompletionTally;
use crate::config::WalkConfig;
use crate::error::ControllerError;
use crate::worker_identity::WorkerId;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Waits until every walker of the run has reported completion.
///
/// Signals are counted as they arrive from any sender in any order. The
/// controller never holds a checklist of pending walkers; unexpected or
/// repeated senders are logged and still counted.
pub struct Controller {
    worker_count: usize,
    wait_timeout: Option<Duration>,
}

impl Controller {
    pub fn new(worker_count: usize, wait_timeout: Option<Duration>) -> Self {
        Self {
            worker_count,
            wait_timeout,
        }
    }

    pub fn from_config(config: &WalkConfig) -> Self {
        Self::new(config.worker_count, config.wait_timeout())
    }

    pub async fn await_walkers<S>(
        &self,
        signaling: &mut S,
        shutdown: &CancellationToken,
    ) -> Result<CompletionTally, ControllerError>
    where
        S: CompletionSignaling,
    {
        let mut tally = CompletionTally::for_worker_count(self.worker_count);
        let mut seen = HashSet::with_capacity(tally.expected());
        let deadline = self.wait_timeout.map(|timeout| Instant::now() + timeout);

        while !tally.is_complete() {
            let next = tokio::select! {
                _ = shutdown.cancelled() => {
                    println!(
                        "Controller: interrupted after {} of {} walkers finished.",
                        tally.received(),
                        tally.expected()
                    );
                    return Err(ControllerError::Interrupted { tally });
                }
                _ = sleep_until(deadline) => {
                    println!(
                        "Controller: only {} of {} walkers finished before timeout.",
                        tally.received(),
                        tally.expected()
                    );
                    return Err(ControllerError::TimedOut { tally });
                }
                signal = signaling.receive_any_completion() => signal,
            };

            match next {
                Some(signal) => {
                    self.check_sender(signal.from, &mut seen);
                    tally.record();
                    debug!(
                        from = %signal.from,
                        received = tally.received(),
                        expected = tally.expected(),
                        "completion signal received"
                    );
                }
                None => {
                    warn!(
                        received = tally.received(),
                        expected = tally.expected(),
                        "completion transport closed early"
                    );
                    return Err(ControllerError::TransportClosed { tally });
                }
            }
        }

        println!("Controller: All {} walkers have finished.", tally.expected());
        Ok(tally)
    }

    fn check_sender(&self, from: WorkerId, seen: &mut HashSet<WorkerId>) {
        if from.is_controller() || from.ordinal() >= self.worker_count {
            warn!(from = %from, "completion signal from unknown walker");
        } else if !seen.insert(from) {
            warn!(from = %from, "duplicate completion signal");
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
