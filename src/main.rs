//! Contractor CLI - contract-driven components with merge-safe upgrades
//!
//! Usage: contractor <COMMAND>
//!
//! Commands:
//!   install   Generate a component and start tracking it
//!   upgrade   Move to a newer contract, keeping local edits
//!   diff      Preview the generated change between versions
//!   status    Show the state of installed components
//!   versions  List available contract versions

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod ui;

use cli::Cli;

/// `CONTRACTOR_LOG` wins over `-v`; tracing goes to stderr so `--json`
/// output stays clean.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("CONTRACTOR_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("contractor={}", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match commands::run(&cli) {
        Ok(code) => code,
        Err(err) => {
            ui::error::print_error(&err, cli.json);
            ExitCode::FAILURE
        }
    }
}
