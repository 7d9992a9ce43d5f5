// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Bounds shared by every walker in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkBounds {
    /// A walk escapes once |position| exceeds this value
    pub domain_half_width: u64,
    /// Hard cap on the number of steps
    pub max_steps: u64,
}

impl WalkBounds {
    pub fn new(domain_half_width: u64, max_steps: u64) -> Self {
        Self {
            domain_half_width,
            max_steps,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkConfig {
    #[serde(flatten)]
    pub bounds: WalkBounds,
    /// Total number of processes, controller included
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    /// Overall controller wait budget in milliseconds (0 = wait forever)
    #[serde(default)]
    pub wait_timeout_ms: u64,
    /// Base seed for the walkers; wall-clock time when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_worker_count() -> usize {
    4
}

impl WalkConfig {
    pub fn new(bounds: WalkBounds, worker_count: usize) -> Self {
        Self {
            bounds,
            worker_count,
            wait_timeout_ms: 0,
            seed: None,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: WalkConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bounds.max_steps == 0 {
            return Err(ConfigError::ZeroMaxSteps);
        }
        if self.worker_count == 0 {
            return Err(ConfigError::ZeroWorkerCount);
        }
        Ok(())
    }

    pub fn walker_count(&self) -> usize {
        self.worker_count.saturating_sub(1)
    }

    pub fn wait_timeout(&self) -> Option<Duration> {
        if self.wait_timeout_ms > 0 {
            Some(Duration::from_millis(self.wait_timeout_ms))
        } else {
            None
        }
    }

    /// Configured seed, or the current wall-clock time in nanoseconds
    pub fn base_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        })
    }

    pub fn print_summary(&self) {
        println!("Configuration:");
        println!("  - Domain half-width: {}", self.bounds.domain_half_width);
        println!("  - Max steps: {}", self.bounds.max_steps);
        println!("  - Walkers: {}", self.walker_count());
        if let Some(timeout) = self.wait_timeout() {
            println!("  - Controller timeout: {}ms", timeout.as_millis());
        }
        if let Some(seed) = self.seed {
            println!("  - Seed: {}", seed);
        }
    }
}
