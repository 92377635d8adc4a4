// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use aghsync::config::Config;
use aghsync::constants::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use aghsync::{logging, scheduler};
use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::{error, info};

/// Reconciles AdGuard Home compatible appliance configuration across a fleet.
#[derive(Debug, Parser)]
#[command(name = "aghsync", version, about)]
struct Cli {
    /// Path to the YAML configuration file.
    ///
    /// Falls back to `SYNC_CONFIG`, then to `config.yaml`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured cron expression for this run.
    #[arg(long)]
    cron: Option<String>,

    /// Run a single reconciliation pass immediately and exit, instead of
    /// starting the cron scheduler.
    #[arg(long)]
    run_once: bool,

    /// Override the log output format (`text` or `json`) for this run.
    #[arg(long)]
    log_format: Option<String>,

    /// Print a shell completion script for the given shell and exit.
    #[arg(long, value_enum)]
    completions: Option<clap_complete::Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("aghsync")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(|| {
        std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    })
}

async fn async_main(cli: Cli) -> Result<()> {
    logging::init(cli.log_format.as_deref());

    let path = config_path(&cli);
    let mut config = Config::load(&path)?;
    if let Some(cron) = &cli.cron {
        config.cron = cron.clone();
    }
    info!(path = %path.display(), replicas = config.unique_replicas().len(), "configuration loaded");

    if cli.run_once {
        let report = scheduler::run_once(&config).await?;
        let mut failures = 0usize;
        for (replica, outcome) in &report {
            if outcome.is_ok() {
                info!(replica = %replica, "reconciled");
            } else {
                failures += 1;
                error!(replica = %replica, outcome = ?outcome, "reconciliation did not fully succeed");
            }
        }
        if failures > 0 {
            anyhow::bail!("{failures} of {} replica(s) had failures", report.len());
        }
        return Ok(());
    }

    scheduler::run(config).await
}
