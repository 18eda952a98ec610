//! Business Management Backend - Entry Point
//!
//! See [`bms::cli`] for the available commands.

use std::process::ExitCode;

use bms::cli::{Cli, run};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    run(Cli::parse()).await
}
