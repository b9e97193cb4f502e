//! snmp-passpersist: serve a pass_persist subtree for net-snmp.
//!
//! Add to snmpd.conf:
//!
//! ```text
//! pass_persist .1.3.6.1.4.1.8072.1.3.1 /usr/local/bin/snmp-passpersist
//! ```
//!
//! The built-in collector publishes information about the agent itself:
//!
//! | Suffix | Type | Value |
//! |---|---|---|
//! | `.1.0` | STRING | agent name and version |
//! | `.2.0` | TIMETICKS | time since start |
//! | `.3.0` | Counter64 | completed refresh cycles |
//! | `.4.0` | GAUGE | entries in the previous generation |

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use clap::Parser;
use snmp_passpersist::cache::MetricsCache;
use snmp_passpersist::cli::args::Args;
use snmp_passpersist::{BoxFuture, Collector, Config, PassPersist, Refresher, Registry};
use tokio_util::sync::CancellationToken;

const AGENT_DESCRIPTION: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

struct AgentInfo {
    started: Instant,
    cycles: AtomicU64,
    cache: Arc<MetricsCache>,
}

impl Collector for AgentInfo {
    fn name(&self) -> &str {
        "agent-info"
    }

    fn collect<'a>(&'a self, registry: &'a Registry) -> BoxFuture<'a, snmp_passpersist::Result<()>> {
        Box::pin(async move {
            let cycles = self.cycles.fetch_add(1, Ordering::Relaxed);
            let entries = u32::try_from(self.cache.committed_len()).unwrap_or(u32::MAX);

            registry.add_string(&[1, 0], AGENT_DESCRIPTION)?;
            registry.add_timeticks(&[2, 0], self.started.elapsed())?;
            registry.add_counter64(&[3, 0], cycles)?;
            registry.add_gauge(&[4, 0], entries)?;
            Ok(())
        })
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    args.init_tracing();

    let config = match args.config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(serve(config));

    // A stdin read may still be parked on a blocking thread
    runtime.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: Config) -> snmp_passpersist::Result<()> {
    let cache = Arc::new(MetricsCache::new());
    let cancel = CancellationToken::new();

    let refresher = Refresher::new(&config, cache.clone(), cancel.clone()).collector(AgentInfo {
        started: Instant::now(),
        cycles: AtomicU64::new(0),
        cache: cache.clone(),
    });
    let refresh_task = tokio::spawn(async move { refresher.run().await });

    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!(target: "snmp_passpersist", "interrupt received");
            signal_cancel.cancel();
        }
    });

    tracing::info!(target: "snmp_passpersist", base = %config.base_oid(), interval = ?config.refresh_interval(), "serving");

    let result = PassPersist::new(&config, cache, cancel.clone()).run().await;

    cancel.cancel();
    if let Err(e) = refresh_task.await {
        tracing::warn!(target: "snmp_passpersist", error = %e, "refresher task failed");
    }

    result
}
