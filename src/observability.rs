//! Logging setup and dispatch counters

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. Logs go to stderr so command
/// output on stdout stays clean.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(err) = result {
        tracing::debug!(error = %err, "Tracing subscriber already installed");
    }
}

/// Counters for special dispatch outcomes
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    handled: AtomicU64,
    declined: AtomicU64,
    unrecognized: AtomicU64,
    failed: AtomicU64,
    pages: AtomicU64,
}

impl DispatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn special_handled(&self) {
        self.handled.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "handled", "Metric incremented");
    }

    /// A handler owned the prefix but reported the special as not handled
    pub fn special_declined(&self) {
        self.declined.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "declined", "Metric incremented");
    }

    pub fn special_unrecognized(&self) {
        self.unrecognized.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "unrecognized", "Metric incremented");
    }

    pub fn special_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "failed", "Metric incremented");
    }

    pub fn page_completed(&self) {
        self.pages.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "pages", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            handled: self.handled.load(Ordering::Relaxed),
            declined: self.declined.load(Ordering::Relaxed),
            unrecognized: self.unrecognized.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            pages: self.pages.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub handled: u64,
    pub declined: u64,
    pub unrecognized: u64,
    pub failed: u64,
    pub pages: u64,
}
