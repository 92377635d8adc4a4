// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Retry logic with exponential backoff for appliance HTTP calls.
//!
//! Retries transient failures (429, 5xx, transport errors) with exponential
//! backoff, while failing fast on permanent errors (4xx client errors).

use rand::Rng;
use reqwest::StatusCode;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::constants::{
    BACKOFF_MULTIPLIER, HTTP_INITIAL_INTERVAL_MILLIS, HTTP_MAX_ELAPSED_TIME_SECS,
    HTTP_MAX_INTERVAL_SECS, RANDOMIZATION_FACTOR,
};
use crate::errors::ApplianceError;

/// Simple exponential backoff implementation.
///
/// Provides exponential backoff with randomization (jitter) to prevent thundering herd.
pub struct ExponentialBackoff {
    /// Current interval duration.
    pub current_interval: Duration,
    /// Maximum interval duration.
    pub max_interval: Duration,
    /// Maximum total elapsed time.
    pub max_elapsed_time: Option<Duration>,
    /// Backoff multiplier (typically 2.0 for doubling).
    pub multiplier: f64,
    /// Randomization factor (e.g., 0.1 for +/-10%).
    pub randomization_factor: f64,
    start_time: Instant,
}

impl ExponentialBackoff {
    fn new(
        initial_interval: Duration,
        max_interval: Duration,
        max_elapsed_time: Option<Duration>,
        multiplier: f64,
        randomization_factor: f64,
    ) -> Self {
        Self {
            current_interval: initial_interval,
            max_interval,
            max_elapsed_time,
            multiplier,
            randomization_factor,
            start_time: Instant::now(),
        }
    }

    /// Get the next backoff interval, or `None` if max elapsed time exceeded.
    pub fn next_backoff(&mut self) -> Option<Duration> {
        if let Some(max_elapsed) = self.max_elapsed_time {
            if self.start_time.elapsed() >= max_elapsed {
                return None;
            }
        }

        let interval = self.current_interval;
        let jittered = self.apply_jitter(interval);

        let next = interval.as_secs_f64() * self.multiplier;
        self.current_interval = Duration::from_secs_f64(next).min(self.max_interval);

        Some(jittered)
    }

    fn apply_jitter(&self, interval: Duration) -> Duration {
        if self.randomization_factor == 0.0 {
            return interval;
        }

        let secs = interval.as_secs_f64();
        let delta = secs * self.randomization_factor;
        let min = secs - delta;
        let max = secs + delta;

        let mut rng = rand::thread_rng();
        let jittered = rng.gen_range(min..=max);

        Duration::from_secs_f64(jittered.max(0.0))
    }
}

/// Exponential backoff configuration for appliance HTTP retries: short
/// intervals since these calls target a nearby control-plane endpoint that
/// should either succeed quickly or fail fast.
#[must_use]
pub fn http_backoff() -> ExponentialBackoff {
    ExponentialBackoff::new(
        Duration::from_millis(HTTP_INITIAL_INTERVAL_MILLIS),
        Duration::from_secs(HTTP_MAX_INTERVAL_SECS),
        Some(Duration::from_secs(HTTP_MAX_ELAPSED_TIME_SECS)),
        BACKOFF_MULTIPLIER,
        RANDOMIZATION_FACTOR,
    )
}

/// Whether an HTTP status code indicates a transient, retryable failure.
#[must_use]
pub fn is_retryable_http_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

/// Retry an appliance API call with exponential backoff.
///
/// Retries while `operation` returns a [`ApplianceError`] for which
/// [`ApplianceError::is_transient`] is true; fails immediately otherwise.
///
/// # Errors
///
/// Returns the last error encountered once retries are exhausted or the
/// error is non-transient.
pub async fn retry_api_call<T, F, Fut>(
    mut operation: F,
    operation_name: &str,
) -> Result<T, ApplianceError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, ApplianceError>>,
{
    let mut backoff = http_backoff();
    let start_time = Instant::now();
    let mut attempt = 0;

    loop {
        attempt += 1;
        let result = operation().await;

        match result {
            Ok(value) => {
                if attempt > 1 {
                    debug!(
                        operation = operation_name,
                        attempt,
                        elapsed = ?start_time.elapsed(),
                        "appliance call succeeded after retries"
                    );
                }
                return Ok(value);
            }
            Err(err) => {
                if !err.is_transient() {
                    return Err(err);
                }

                match backoff.next_backoff() {
                    Some(duration) => {
                        warn!(
                            operation = operation_name,
                            attempt,
                            retry_after = ?duration,
                            error = %err,
                            "retryable appliance error, will retry"
                        );
                        tokio::time::sleep(duration).await;
                    }
                    None => {
                        return Err(err);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod retry_tests;
