// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Counting barrier state owned by the controller.
///
/// `received` only grows and never exceeds `expected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionTally {
    expected: usize,
    received: usize,
}

impl CompletionTally {
    /// `worker_count` includes the controller itself
    pub fn for_worker_count(worker_count: usize) -> Self {
        Self {
            expected: worker_count.saturating_sub(1),
            received: 0,
        }
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn received(&self) -> usize {
        self.received
    }

    pub fn remaining(&self) -> usize {
        self.expected - self.received
    }

    pub fn is_complete(&self) -> bool {
        self.received == self.expected
    }

    /// Count one arrival. Returns false if the tally was already complete.
    pub fn record(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.received += 1;
        true
    }
}
