//! Binary crate for the `wwo` command-line weather dashboard.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Picking a presenter once at startup
//! - Human-friendly output formatting and exit codes

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod render;

/// Logs go to stderr so they never mix with the dashboard on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cmd = cli::Cli::parse();
    cmd.run().await
}
