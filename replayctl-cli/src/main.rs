// replayctl-cli/src/main.rs
//
// Entry point for the replayctl CLI. Responsibilities:
// - Initializing logging (env_logger, RUST_LOG, default "info").
// - Parsing arguments and printing usage on misuse (exit code 1).
// - Dispatching to the command implementations.
// - Reporting errors to stderr and exiting non-zero on any failure.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version requests land on stdout and exit 0; every
            // actual usage error goes to stderr and exits 1.
            let is_usage_error = err.use_stderr();
            let _ = err.print();
            process::exit(i32::from(is_usage_error));
        }
    };

    let result = match cli.command {
        Commands::Overlay(args) => commands::overlay::run_overlay(args),
        Commands::AddIndices(args) => commands::replays::run_add_indices(args),
        Commands::CountFrames(args) => commands::replays::run_count_frames(args),
        Commands::SortReplays(args) => commands::replays::run_sort_replays(args),
    };

    if let Err(err) = result {
        log::error!("{err}");
        process::exit(1);
    }
}
