// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal of a process within a run. Ordinal 0 is the controller,
/// every other ordinal is a walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(usize);

impl WorkerId {
    pub const CONTROLLER: WorkerId = WorkerId(0);

    pub fn new(ordinal: usize) -> Self {
        Self(ordinal)
    }

    pub fn ordinal(self) -> usize {
        self.0
    }

    pub fn is_controller(self) -> bool {
        self == Self::CONTROLLER
    }

    pub fn is_walker(self) -> bool {
        !self.is_controller()
    }

    /// Walker identities for a run of `worker_count` processes: `1..worker_count`
    pub fn walkers(worker_count: usize) -> impl Iterator<Item = WorkerId> {
        (1..worker_count.max(1)).map(WorkerId)
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_is_ordinal_zero() {
        assert!(WorkerId::new(0).is_controller());
        assert!(WorkerId::new(3).is_walker());
    }

    #[test]
    fn test_walkers_skip_controller() {
        let ids: Vec<usize> = WorkerId::walkers(4).map(WorkerId::ordinal).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_no_walkers_for_single_or_empty_run() {
        assert_eq!(WorkerId::walkers(1).count(), 0);
        assert_eq!(WorkerId::walkers(0).count(), 0);
    }
}
