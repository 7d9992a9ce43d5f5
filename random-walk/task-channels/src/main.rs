// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::Parser;
use random_walk_core::logging::init_logging;
use random_walk_core::run_args::RunArgs;
use random_walk_core::simulation::run_simulation;
use random_walk_task_channels::channel_completion_signaling::ChannelCompletionSignaling;
use random_walk_task_channels::tokio_runtime::TokioRuntime;
use std::process::ExitCode;
use tokio::{signal, spawn};
use tokio_util::sync::CancellationToken;

/// Random walkers as tokio tasks, reporting over an in-memory channel
#[derive(Parser)]
#[command(name = "random-walk-tasks", author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.run.verbose);

    let config = match cli.run.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("=== RANDOM WALK (Task-Channels) ===");
    config.print_summary();
    println!();

    // Setup Ctrl+C handler
    let shutdown = CancellationToken::new();
    let ctrl_c_token = shutdown.clone();
    spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n=== Ctrl+C received, abandoning wait ===");
            ctrl_c_token.cancel();
        }
    });

    let signaling = ChannelCompletionSignaling::new();
    match run_simulation::<_, TokioRuntime>(&config, signaling, &shutdown).await {
        Ok(report) => {
            println!("Total time: {:.2}s", report.elapsed.as_secs_f64());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
