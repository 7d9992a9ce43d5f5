// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::completion_signaling::CompletionSender;
use crate::config::WalkBounds;
use crate::error::SignalError;
use crate::worker_identity::WorkerId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Mixes the run's base seed with a walker identity so walkers started
/// at the same instant draw different sequences
pub fn walker_seed(base_seed: u64, walker_id: WorkerId) -> u64 {
    base_seed ^ (walker_id.ordinal() as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Position and step counter of a single walk
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkState {
    position: i64,
    steps_taken: u64,
}

impl WalkState {
    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn step(&mut self, forward: bool) {
        self.position += if forward { 1 } else { -1 };
        self.steps_taken += 1;
    }

    pub fn has_escaped(&self, domain_half_width: u64) -> bool {
        self.position.unsigned_abs() > domain_half_width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOutcome {
    pub walker_id: WorkerId,
    pub steps_taken: u64,
    pub final_position: i64,
    /// True if the walk left the domain, false if it ran out of steps
    pub escaped: bool,
}

pub struct Walker {
    id: WorkerId,
    bounds: WalkBounds,
}

impl Walker {
    pub fn new(id: WorkerId, bounds: WalkBounds) -> Self {
        Self { id, bounds }
    }

    /// Runs the walk to local termination. The exit condition is checked
    /// after every step, so at least one step is always taken.
    pub fn walk<R: Rng>(&self, rng: &mut R) -> WalkOutcome {
        let mut state = WalkState::default();
        loop {
            state.step(rng.random::<bool>());

            let escaped = state.has_escaped(self.bounds.domain_half_width);
            if escaped || state.steps_taken() >= self.bounds.max_steps {
                return WalkOutcome {
                    walker_id: self.id,
                    steps_taken: state.steps_taken(),
                    final_position: state.position(),
                    escaped,
                };
            }
        }
    }
}

/// Walk, report, and signal the controller exactly once
pub async fn run_walker<S: CompletionSender>(
    walker_id: WorkerId,
    bounds: WalkBounds,
    seed: u64,
    sender: &S,
) -> Result<WalkOutcome, SignalError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let outcome = Walker::new(walker_id, bounds).walk(&mut rng);

    println!(
        "Walker {} finished in {} steps (position {}).",
        walker_id, outcome.steps_taken, outcome.final_position
    );
    debug!(walker = %walker_id, escaped = outcome.escaped, "sending completion signal");

    sender.send_completion(walker_id).await?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    fn walk_with_seed(bounds: WalkBounds, seed: u64) -> WalkOutcome {
        let mut rng = StdRng::seed_from_u64(seed);
        Walker::new(WorkerId::new(1), bounds).walk(&mut rng)
    }

    #[test]
    fn test_zero_half_width_escapes_on_first_step() {
        for seed in 0..32 {
            let outcome = walk_with_seed(WalkBounds::new(0, 1000), seed);
            assert_eq!(outcome.steps_taken, 1);
            assert_eq!(outcome.final_position.abs(), 1);
            assert!(outcome.escaped);
        }
    }

    #[test]
    fn test_single_step_cap() {
        let outcome = walk_with_seed(WalkBounds::new(10, 1), 42);
        assert_eq!(outcome.steps_taken, 1);
        assert!(!outcome.escaped);
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let bounds = WalkBounds::new(5, 1000);
        let first = walk_with_seed(bounds, 1234);
        let second = walk_with_seed(bounds, 1234);
        assert_eq!(first, second);
    }

    #[test]
    fn test_walker_seeds_differ_per_identity() {
        let base = 99;
        let a = walker_seed(base, WorkerId::new(1));
        let b = walker_seed(base, WorkerId::new(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_walk_state_step() {
        let mut state = WalkState::default();
        state.step(true);
        state.step(true);
        state.step(false);

        assert_eq!(state.position(), 1);
        assert_eq!(state.steps_taken(), 3);
        assert!(state.has_escaped(0));
        assert!(!state.has_escaped(1));
    }

    proptest! {
        #[test]
        fn walk_terminates_within_bounds(
            half_width in 0u64..20,
            max_steps in 1u64..500,
            seed in any::<u64>(),
        ) {
            let outcome = walk_with_seed(WalkBounds::new(half_width, max_steps), seed);

            prop_assert!(outcome.steps_taken >= 1);
            prop_assert!(outcome.steps_taken <= max_steps);
            prop_assert!(
                outcome.final_position.unsigned_abs() > half_width
                    || outcome.steps_taken == max_steps
            );
            prop_assert_eq!(outcome.escaped, outcome.final_position.unsigned_abs() > half_width);
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSender {
        sent: Arc<Mutex<Vec<WorkerId>>>,
    }

    #[async_trait]
    impl CompletionSender for RecordingSender {
        async fn send_completion(&self, from: WorkerId) -> Result<(), SignalError> {
            self.sent.lock().unwrap().push(from);
            Ok(())
        }
    }

    #[derive(Clone)]
    struct ClosedSender;

    #[async_trait]
    impl CompletionSender for ClosedSender {
        async fn send_completion(&self, _from: WorkerId) -> Result<(), SignalError> {
            Err(SignalError::Disconnected)
        }
    }

    #[tokio::test]
    async fn test_run_walker_signals_exactly_once() {
        // Arrange
        let sender = RecordingSender::default();
        let id = WorkerId::new(7);

        // Act
        let outcome = run_walker(id, WalkBounds::new(5, 1000), 3, &sender)
            .await
            .unwrap();

        // Assert
        assert_eq!(outcome.walker_id, id);
        assert_eq!(*sender.sent.lock().unwrap(), vec![id]);
    }

    #[tokio::test]
    async fn test_run_walker_reports_send_failure() {
        let result = run_walker(WorkerId::new(1), WalkBounds::new(5, 10), 3, &ClosedSender).await;
        assert!(matches!(result, Err(SignalError::Disconnected)));
    }
}
