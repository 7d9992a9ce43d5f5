// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::{WalkBounds, WalkConfig};
use crate::error::ConfigError;
use clap::Args;
use std::path::PathBuf;

const DEFAULT_WORKERS: usize = 4;

/// Command-line arguments shared by every runtime variant
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// A walk ends once |position| exceeds this value
    #[arg(required_unless_present = "config")]
    pub domain_half_width: Option<u64>,

    /// Maximum number of steps per walk
    #[arg(required_unless_present = "config")]
    pub max_steps: Option<u64>,

    /// Total number of workers, controller included [default: 4]
    #[arg(short = 'n', long)]
    pub workers: Option<usize>,

    /// Give up waiting after this many milliseconds (0 = wait forever) [default: 0]
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Base seed for the walkers (default: wall-clock time)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Load bounds and defaults from a JSON file; flags given alongside override it
    #[arg(long, conflicts_with_all = ["domain_half_width", "max_steps"])]
    pub config: Option<PathBuf>,

    /// Enable debug diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunArgs {
    pub fn to_config(&self) -> Result<WalkConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => WalkConfig::load(path)?,
            None => WalkConfig::new(
                WalkBounds::new(
                    self.domain_half_width.unwrap_or_default(),
                    self.max_steps.unwrap_or_default(),
                ),
                DEFAULT_WORKERS,
            ),
        };

        if let Some(workers) = self.workers {
            config.worker_count = workers;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.wait_timeout_ms = timeout_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}
