// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The cron-driven pass trigger loop.
//!
//! Evaluates `config.cron` and calls [`crate::reconciler::run_pass`] on each
//! tick. Overlapping triggers are skipped with a log line rather than
//! queued: a pass still in flight when the next tick fires is left alone,
//! and the tick is dropped.
//!
//! Shutdown (`Ctrl+C` / `SIGTERM`) is handled with a `tokio::select!` against
//! the tick timer.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use cron::Schedule;
use tracing::{error, info, warn};

use crate::appliance::http::HttpApplianceClient;
use crate::appliance::ApplianceClient;
use crate::config::Config;
use crate::errors::ApplianceError;
use crate::model::InstanceDescriptor;
use crate::reconciler::{run_pass, PassReport, ReplicaOutcome};

fn http_client_factory(
    instance: &InstanceDescriptor,
) -> Result<Arc<dyn ApplianceClient>, ApplianceError> {
    HttpApplianceClient::new(instance).map(|client| Arc::new(client) as Arc<dyn ApplianceClient>)
}

/// Run the scheduler loop until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if `config.cron` does not parse as a cron expression.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let schedule = Schedule::from_str(&config.cron)?;
    let busy = Arc::new(AtomicBool::new(false));

    if config.run_on_start {
        info!("runOnStart is set, running an initial pass before the first scheduled tick");
        trigger_pass(&config, &busy);
    }

    let mut upcoming = schedule.upcoming(Utc);
    loop {
        let Some(next_tick) = upcoming.next() else {
            warn!("cron schedule produced no further occurrences, stopping scheduler");
            break;
        };
        let wait = (next_tick - Utc::now())
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);

        tokio::select! {
            () = tokio::time::sleep(wait) => {
                trigger_pass(&config, &busy);
            }
            () = shutdown_signal() => {
                info!("shutdown signal received, stopping scheduler");
                break;
            }
        }
    }

    Ok(())
}

/// Run a single pass immediately and return its report, bypassing the cron
/// schedule entirely. Used by the `--once` CLI flag.
///
/// # Errors
///
/// Propagates [`crate::errors::ReconcileError::Origin`] if the origin could
/// not be snapshotted.
pub async fn run_once(config: &Config) -> Result<PassReport, crate::errors::ReconcileError> {
    let replicas = config.unique_replicas();
    run_pass(&config.origin, &replicas, &config.features, &http_client_factory).await
}

/// Attempt to claim the busy flag for a new pass. Returns `false` (and
/// leaves the flag untouched) if a pass is already in flight.
fn try_acquire(busy: &AtomicBool) -> bool {
    busy.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
}

fn trigger_pass(config: &Config, busy: &Arc<AtomicBool>) {
    if !try_acquire(busy) {
        warn!("previous reconciliation pass is still running, skipping this tick");
        return;
    }

    let config = config.clone();
    let busy = Arc::clone(busy);
    tokio::spawn(async move {
        let replicas = config.unique_replicas();
        match run_pass(&config.origin, &replicas, &config.features, &http_client_factory).await {
            Ok(report) => log_report(&report),
            Err(err) => error!(error = %err, "reconciliation pass aborted"),
        }
        busy.store(false, Ordering::SeqCst);
    });
}

fn log_report(report: &PassReport) {
    for (replica, outcome) in report {
        match outcome {
            ReplicaOutcome::Ok => info!(replica = %replica, "reconciled"),
            ReplicaOutcome::NotReady(err) => {
                warn!(replica = %replica, error = %err, "replica not ready");
            }
            ReplicaOutcome::Failed(errors) => {
                for failure in errors {
                    error!(
                        replica = %replica,
                        subsystem = failure.subsystem,
                        error = %failure.source,
                        "subsystem reconciliation failed"
                    );
                }
            }
        }
    }
}

/// Resolves when either `Ctrl+C` or (on unix) `SIGTERM` is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod scheduler_tests;
