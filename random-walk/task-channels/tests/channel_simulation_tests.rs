// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use random_walk_core::completion_signaling::{CompletionSender, CompletionSignaling};
use random_walk_core::config::{WalkBounds, WalkConfig};
use random_walk_core::controller::Controller;
use random_walk_core::simulation::run_simulation;
use random_walk_core::walker::{walker_seed, WalkOutcome};
use random_walk_core::worker_identity::WorkerId;
use random_walk_core::worker_runtime::{WalkerTask, WorkerRuntime};
use random_walk_task_channels::channel_completion_signaling::{
    ChannelCompletionSender, ChannelCompletionSignaling,
};
use random_walk_task_channels::tokio_runtime::TokioRuntime;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_three_walkers_all_finish() {
    // Arrange
    let config = WalkConfig::new(WalkBounds::new(5, 1000), 4);

    // Act
    let report = run_simulation::<_, TokioRuntime>(
        &config,
        ChannelCompletionSignaling::new(),
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    // Assert
    assert_eq!(report.tally.expected(), 3);
    assert_eq!(report.tally.received(), 3);
}

/// Runs `worker_count - 1` walkers as tokio tasks against one controller and
/// returns every walker's outcome once the controller has been released.
async fn run_walkers_collecting_outcomes(
    bounds: WalkBounds,
    worker_count: usize,
) -> Vec<WalkOutcome> {
    let mut signaling = ChannelCompletionSignaling::new();
    let handles: Vec<_> = WorkerId::walkers(worker_count)
        .map(|walker_id| {
            let task = WalkerTask {
                walker_id,
                bounds,
                seed: walker_seed(2025, walker_id),
                sender: signaling.get_sender(walker_id),
            };
            <TokioRuntime as WorkerRuntime<WalkerTask<ChannelCompletionSender>>>::spawn(task)
                .unwrap()
        })
        .collect();

    let tally = Controller::new(worker_count, Some(Duration::from_secs(10)))
        .await_walkers(&mut signaling, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(tally.received(), worker_count - 1);

    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        outcomes.push(handle.await.unwrap().unwrap());
    }
    outcomes
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_hundred_single_step_walkers() {
    // Arrange
    let mut config = WalkConfig::new(WalkBounds::new(0, 1), 101);
    config.seed = Some(2025);

    // Act
    let report = run_simulation::<_, TokioRuntime>(
        &config,
        ChannelCompletionSignaling::new(),
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    // Assert
    assert_eq!(report.tally.received(), 100);
    assert!(report.tally.is_complete());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_hundred_walkers_escape_after_one_step() {
    // Arrange
    let bounds = WalkBounds::new(0, 1);

    // Act
    let outcomes = run_walkers_collecting_outcomes(bounds, 101).await;

    // Assert
    assert_eq!(outcomes.len(), 100);
    for outcome in &outcomes {
        assert_eq!(outcome.steps_taken, 1, "walker {}", outcome.walker_id);
        assert_eq!(outcome.final_position.abs(), 1);
        assert!(outcome.escaped);
    }
    let mut ids: Vec<WorkerId> = outcomes.iter().map(|o| o.walker_id).collect();
    ids.sort();
    assert_eq!(ids, WorkerId::walkers(101).collect::<Vec<_>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_hundred_walkers_stop_at_single_step_budget() {
    // Arrange
    let bounds = WalkBounds::new(10, 1);

    // Act
    let outcomes = run_walkers_collecting_outcomes(bounds, 101).await;

    // Assert
    assert_eq!(outcomes.len(), 100);
    for outcome in &outcomes {
        assert_eq!(outcome.steps_taken, 1, "walker {}", outcome.walker_id);
        assert!(!outcome.escaped);
    }
}

#[tokio::test]
async fn test_single_worker_run_has_no_walkers() {
    let config = WalkConfig::new(WalkBounds::new(5, 10), 1);

    let report = run_simulation::<_, TokioRuntime>(
        &config,
        ChannelCompletionSignaling::new(),
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(report.tally.expected(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shuffled_staggered_arrivals() {
    // Arrange: walkers report from separate tasks in a shuffled order with delays
    let mut signaling = ChannelCompletionSignaling::new();
    let mut ids: Vec<WorkerId> = WorkerId::walkers(21).collect();
    ids.shuffle(&mut StdRng::seed_from_u64(7));

    for (delay, id) in ids.into_iter().enumerate() {
        let sender = signaling.get_sender(id);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis((delay % 5) as u64)).await;
            sender.send_completion(id).await.unwrap();
        });
    }

    // Act
    let tally = Controller::new(21, Some(Duration::from_secs(10)))
        .await_walkers(&mut signaling, &CancellationToken::new())
        .await
        .unwrap();

    // Assert
    assert_eq!(tally.received(), 20);
}

#[tokio::test]
async fn test_missing_walker_times_out() {
    // Arrange: only two of three walkers ever report
    let mut signaling = ChannelCompletionSignaling::new();
    for id in [WorkerId::new(1), WorkerId::new(3)] {
        signaling.get_sender(id).send_completion(id).await.unwrap();
    }

    // Act
    let result = Controller::new(4, Some(Duration::from_millis(50)))
        .await_walkers(&mut signaling, &CancellationToken::new())
        .await;

    // Assert
    let err = result.unwrap_err();
    assert_eq!(err.tally().received(), 2);
    assert_eq!(err.tally().expected(), 3);
}
