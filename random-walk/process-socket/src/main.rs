// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::{Parser, Subcommand};
use random_walk_core::logging::init_logging;
use random_walk_core::run_args::RunArgs;
use random_walk_core::simulation::run_simulation;
use random_walk_core::worker_runtime::{WalkerTask, WorkerTask};
use random_walk_process_socket::process_runtime::ProcessRuntime;
use random_walk_process_socket::socket_completion_signaling::{
    SocketCompletionSender, SocketCompletionSignaling,
};
use std::process::ExitCode;
use tokio::{signal, spawn};
use tokio_util::sync::CancellationToken;

/// Random walkers as separate processes, reporting to the controller over TCP
#[derive(Parser)]
#[command(name = "random-walk-processes", author, version, about, long_about = None)]
#[command(subcommand_negates_reqs = true, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    role: Option<Role>,
}

#[derive(Subcommand)]
enum Role {
    /// Run a single walker (spawned by the controller)
    #[command(hide = true)]
    Walker {
        /// Serialized walker task
        #[arg(long)]
        task: String,

        /// Enable debug diagnostics on stderr
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.role {
        Some(Role::Walker { task, verbose }) => {
            init_logging(verbose);
            run_walker(&task).await
        }
        None => {
            init_logging(cli.run.verbose);
            run_controller(&cli.run).await
        }
    }
}

async fn run_walker(task_json: &str) -> ExitCode {
    let task: WalkerTask<SocketCompletionSender> = match serde_json::from_str(task_json) {
        Ok(task) => task,
        Err(e) => {
            eprintln!("Invalid walker task: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let walker_id = task.walker_id;
    match task.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Walker {} could not signal the controller: {}", walker_id, e);
            ExitCode::FAILURE
        }
    }
}

async fn run_controller(args: &RunArgs) -> ExitCode {
    let config = match args.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("=== RANDOM WALK (Process-Socket) ===");
    config.print_summary();
    println!();

    let signaling = match SocketCompletionSignaling::bind("127.0.0.1:0").await {
        Ok(signaling) => signaling,
        Err(e) => {
            eprintln!("Failed to bind completion listener: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(addr = %signaling.local_addr(), "controller listening");

    // Setup Ctrl+C handler
    let shutdown = CancellationToken::new();
    let ctrl_c_token = shutdown.clone();
    spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n=== Ctrl+C received, abandoning wait ===");
            ctrl_c_token.cancel();
        }
    });

    match run_simulation::<_, ProcessRuntime>(&config, signaling, &shutdown).await {
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
