//! Refresh scheduler.
//!
//! The [`Refresher`] runs every registered [`Collector`] on a fixed interval
//! and commits the staged buffer after each cycle.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use snmp_passpersist::cache::MetricsCache;
//! use snmp_passpersist::{Config, FnCollector, Refresher};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() {
//! let config = Config::default();
//! let cache = Arc::new(MetricsCache::new());
//! let refresher = Refresher::new(&config, cache, CancellationToken::new())
//!     .collector(FnCollector::new("answer", |registry| registry.add_int(&[0], 42)));
//!
//! refresher.run().await;
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::cache::MetricsCache;
use crate::collector::Collector;
use crate::config::Config;
use crate::registry::Registry;

/// Outcome of one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Collectors that returned an error.
    pub failures: usize,
    /// Entries in the generation committed at the end of the cycle.
    pub committed: usize,
}

/// Periodically repopulates and commits a [`MetricsCache`].
pub struct Refresher {
    interval: Duration,
    cache: Arc<MetricsCache>,
    registry: Registry,
    collectors: Vec<Box<dyn Collector>>,
    cancel: CancellationToken,
}

impl Refresher {
    /// Create a refresher for `cache` using the base OID and interval from `config`.
    pub fn new(config: &Config, cache: Arc<MetricsCache>, cancel: CancellationToken) -> Self {
        Self {
            interval: config.refresh_interval(),
            registry: Registry::new(config.base_oid().clone(), cache.clone()),
            cache,
            collectors: Vec::new(),
            cancel,
        }
    }

    /// Add a collector. Collectors run in the order they were added.
    pub fn collector(mut self, collector: impl Collector) -> Self {
        self.collectors.push(Box::new(collector));
        self
    }

    /// The registry collectors stage into.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run every collector once, then commit.
    ///
    /// A failing collector is logged and skipped; the commit happens
    /// regardless and promotes whatever was staged.
    pub async fn run_once(&self) -> CycleReport {
        let mut failures = 0;

        for collector in &self.collectors {
            if let Err(e) = collector.collect(&self.registry).await {
                failures += 1;
                tracing::warn!(target: "snmp_passpersist::refresh", collector = collector.name(), error = %e, "collector failed");
            }
        }

        let committed = self.cache.commit();
        tracing::debug!(target: "snmp_passpersist::refresh", committed, failures, "refresh cycle complete");

        CycleReport {
            failures,
            committed,
        }
    }

    /// Run cycles on the configured interval until cancelled.
    ///
    /// The first cycle runs immediately. A cycle already in progress when
    /// cancellation fires runs to completion (including its commit); no
    /// further cycle is started.
    #[instrument(skip(self), fields(interval = ?self.interval, collectors = self.collectors.len()))]
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    tracing::info!(target: "snmp_passpersist::refresh", "refresher shutdown requested");
                    return;
                }
                _ = ticker.tick() => {}
            }

            self.run_once().await;
        }
    }
}

impl std::fmt::Debug for Refresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refresher")
            .field("interval", &self.interval)
            .field(
                "collectors",
                &self.collectors.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
