//! # snmp-passpersist
//!
//! Runtime for net-snmp `pass_persist` sub-agents.
//!
//! The host `snmpd` forwards `get`/`getnext`/`set` requests for a configured
//! subtree over the sub-agent's standard input and reads replies from its
//! standard output. This crate provides the pieces needed to serve such a
//! subtree from dynamically collected data:
//!
//! - [`Oid`] and [`Value`]: the OID and typed-value model
//! - [`cache::MetricsCache`]: a staged/committed cache with an ordered index
//! - [`Registry`]: the `add_*` surface collectors use to stage values
//! - [`Refresher`]: runs [`Collector`]s on an interval and commits each cycle
//! - [`agent::PassPersist`]: the line-oriented protocol engine
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use snmp_passpersist::agent::PassPersist;
//! use snmp_passpersist::cache::MetricsCache;
//! use snmp_passpersist::{Config, FnCollector, Refresher};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> snmp_passpersist::Result<()> {
//!     let config = Config::default();
//!     let cache = Arc::new(MetricsCache::new());
//!     let cancel = CancellationToken::new();
//!
//!     let refresher = Refresher::new(&config, cache.clone(), cancel.clone())
//!         .collector(FnCollector::new("answer", |registry| registry.add_int(&[0], 42)));
//!     tokio::spawn(async move { refresher.run().await });
//!
//!     // snmpd.conf: pass_persist .1.3.6.1.4.1.8072.1.3.1 /path/to/this/binary
//!     let result = PassPersist::new(&config, cache, cancel.clone()).run().await;
//!     cancel.cancel();
//!     result
//! }
//! ```

pub mod agent;
pub mod cache;
pub mod collector;
pub mod config;
pub mod error;
pub mod oid;
pub mod prelude;
pub mod refresh;
pub mod registry;
pub mod value;
pub mod varbind;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use agent::PassPersist;
pub use collector::{BoxFuture, Collector, FnCollector};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, OidErrorKind, Result};
pub use oid::Oid;
pub use refresh::{CycleReport, Refresher};
pub use registry::Registry;
pub use value::{TypeKeyword, Value};
pub use varbind::VarBind;
