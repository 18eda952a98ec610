//! Operator CLI
//!
//! | Command | Description |
//! |---------|-------------|
//! | `bms providers` | List registered factories, env builders and repository keys as JSON |
//! | `bms check` | Bootstrap the configured providers, print the health report, close |
//!
//! `check` exits non-zero when any enabled instance is unhealthy or when
//! bootstrap fails. Close failures are printed to stderr but leave the exit
//! code alone. Ctrl-C cancels an in-flight sweep.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bms_application::ports::registry::{ProviderFactories, list_repository_factories};
use bms_domain::error::Error;
use bms_infrastructure::config::{AppConfig, ConfigLoader};
use bms_infrastructure::logging::init_logging;
use bms_infrastructure::{Bootstrap, HealthReport, ProbeContext};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::default_factories;

/// Command line interface for the business management backend
#[derive(Parser, Debug)]
#[command(name = "bms")]
#[command(about = "Business management backend - provider registry tools")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every registered provider factory, env builder and repository key
    Providers,

    /// Build the configured providers and report their health
    Check {
        /// Overall deadline for the health sweep in milliseconds
        /// (defaults to `health.timeout_ms` from configuration)
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let factories = default_factories();
    match cli.command {
        Command::Providers => {
            println!("{}", serde_json::to_string_pretty(&provider_listing(&factories))?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { timeout_ms } => {
            let mut loader = ConfigLoader::new();
            if let Some(path) = &cli.config {
                loader = loader.with_config_path(path);
            }
            let config = loader.load().context("Failed to load configuration")?;
            init_logging(&config.logging).context("Failed to initialize logging")?;

            let timeout = timeout_ms.map_or_else(|| config.health.timeout(), Duration::from_millis);
            let outcome = check(config, Arc::new(factories), timeout).await?;

            println!("{}", serde_json::to_string_pretty(&outcome.report)?);
            if let Some(err) = &outcome.close_error {
                eprintln!("close: {err}");
            }
            Ok(if outcome.report.is_ready() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Registered names of every table, as printed by `bms providers`
pub fn provider_listing(factories: &ProviderFactories) -> Value {
    json!({
        "factories": factories.list_all_available_factories(),
        "build_from_env": factories.list_all_available_build_from_env(),
        "repositories": list_repository_factories(factories),
    })
}

/// Result of one `check` run
#[derive(Debug)]
pub struct CheckOutcome {
    pub report: HealthReport,
    /// Aggregated close failure, if any instance refused to close
    pub close_error: Option<Error>,
}

/// Bootstrap, sweep once within `timeout`, then close everything
///
/// Each instance also gets `timeout` to close, so a provider that hangs on
/// shutdown cannot keep the process alive. Only bootstrap failures are
/// returned as errors; close failures are carried in the outcome next to the
/// report.
pub async fn check(
    config: AppConfig,
    factories: Arc<ProviderFactories>,
    timeout: Duration,
) -> anyhow::Result<CheckOutcome> {
    let infra = Bootstrap::new(config, factories)
        .build()
        .await
        .context("Bootstrap failed")?;

    let ctx = ProbeContext::new().with_timeout(timeout);
    let interrupt = ctx.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling health checks");
            interrupt.cancel();
        }
    });

    let report = HealthReport::collect(&infra.registry, &ctx).await;
    watcher.abort();
    info!(status = ?report.status, checks = report.checks.len(), "Health sweep finished");

    let close_error = infra.registry.close_within(timeout).await.err();
    Ok(CheckOutcome {
        report,
        close_error,
    })
}
