// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The pipeline's own observability.
//!
//! A [`PipelineTelemetry`] is constructed explicitly at startup and passed
//! by reference to the components that need it. It owns the `tracing`
//! dispatcher and the internal counters; nothing is registered globally, so
//! several pipelines can coexist in one process and tear down
//! independently.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{self, Display};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::dispatcher::{self, Dispatch};
use tracing_subscriber::EnvFilter;

/// Configuration of the pipeline's self-observability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// `tracing` env-filter directive for the pipeline's own logs, e.g.
    /// `"info"` or `"libotel_data_pipeline=debug"`.
    pub log_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        TelemetryConfig {
            log_filter: "info".to_string(),
        }
    }
}

/// Error constructing the telemetry context.
#[derive(Debug)]
pub enum TelemetryError {
    /// The configured log filter directive did not parse.
    InvalidLogFilter(String),
}

impl Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidLogFilter(detail) => {
                write!(f, "invalid log filter: {detail}")
            }
        }
    }
}

impl Error for TelemetryError {}

/// Explicitly constructed self-observability context with an init/shutdown
/// lifecycle.
pub struct PipelineTelemetry {
    dispatch: Dispatch,
    metrics: Arc<PipelineMetrics>,
    shut_down: AtomicBool,
}

impl PipelineTelemetry {
    /// Builds the context: a log subscriber honoring the configured filter,
    /// and a fresh set of internal counters.
    pub fn init(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        let filter = EnvFilter::try_new(&config.log_filter)
            .map_err(|source| TelemetryError::InvalidLogFilter(source.to_string()))?;
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .finish();
        Ok(PipelineTelemetry {
            dispatch: Dispatch::new(subscriber),
            metrics: Arc::new(PipelineMetrics::default()),
            shut_down: AtomicBool::new(false),
        })
    }

    /// Runs `f` with this context's dispatcher as the thread default, so
    /// `tracing` events emitted inside land in this pipeline's subscriber.
    /// After shutdown, `f` runs without a dispatcher.
    pub fn in_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        if self.is_shut_down() {
            return f();
        }
        dispatcher::with_default(&self.dispatch, f)
    }

    /// A handle to the internal counters, for components that record into
    /// them.
    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Marks the context shut down. Subsequent [`Self::in_scope`] calls run
    /// without a dispatcher; counters remain readable.
    pub fn shutdown(&self) {
        self.shut_down.store(true, Ordering::Release);
    }

    /// True once [`Self::shutdown`] has been called.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }
}

/// Internal counters of the pipeline's export path.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    batches_pushed: AtomicU64,
    items_pushed: AtomicU64,
    items_failed: AtomicU64,
}

impl PipelineMetrics {
    pub(crate) fn record_push(&self, items: u64) {
        self.batches_pushed.fetch_add(1, Ordering::Relaxed);
        self.items_pushed.fetch_add(items, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self, items: u64) {
        self.items_failed.fetch_add(items, Ordering::Relaxed);
    }

    /// Number of batches pushed successfully.
    pub fn batches_pushed(&self) -> u64 {
        self.batches_pushed.load(Ordering::Relaxed)
    }

    /// Number of items (spans, metrics, log records) pushed successfully.
    pub fn items_pushed(&self) -> u64 {
        self.items_pushed.load(Ordering::Relaxed)
    }

    /// Number of items that failed to marshal or deliver.
    pub fn items_failed(&self) -> u64 {
        self.items_failed.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_accepts_default_config() {
        let telemetry = PipelineTelemetry::init(&TelemetryConfig::default()).unwrap();
        assert!(!telemetry.is_shut_down());
        assert_eq!(0, telemetry.metrics().batches_pushed());
    }

    #[test]
    fn init_rejects_bad_filter() {
        let config = TelemetryConfig {
            log_filter: "producer=notalevel".to_string(),
        };
        assert!(matches!(
            PipelineTelemetry::init(&config),
            Err(TelemetryError::InvalidLogFilter(_))
        ));
    }

    #[test]
    fn in_scope_runs_closure_before_and_after_shutdown() {
        let telemetry = PipelineTelemetry::init(&TelemetryConfig::default()).unwrap();
        assert_eq!(3, telemetry.in_scope(|| 3));
        telemetry.shutdown();
        assert!(telemetry.is_shut_down());
        assert_eq!(4, telemetry.in_scope(|| 4));
    }

    #[test]
    fn counters_accumulate() {
        let metrics = PipelineMetrics::default();
        metrics.record_push(5);
        metrics.record_push(2);
        metrics.record_failure(1);
        assert_eq!(2, metrics.batches_pushed());
        assert_eq!(7, metrics.items_pushed());
        assert_eq!(1, metrics.items_failed());
    }

    #[test]
    fn two_contexts_coexist() {
        let a = PipelineTelemetry::init(&TelemetryConfig::default()).unwrap();
        let b = PipelineTelemetry::init(&TelemetryConfig {
            log_filter: "debug".to_string(),
        })
        .unwrap();
        a.metrics().record_push(1);
        assert_eq!(1, a.metrics().batches_pushed());
        assert_eq!(0, b.metrics().batches_pushed());
    }
}
