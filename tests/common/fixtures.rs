//! Common test fixtures and constants.

use std::sync::Arc;
use std::time::Duration;

use snmp_passpersist::cache::MetricsCache;
use snmp_passpersist::{Config, Oid, Registry, oid};

// =============================================================================
// Base subtree (NET-SNMP-PASS-MIB examples: 1.3.6.1.4.1.8072.1.3.1)
// =============================================================================

pub const BASE_TEXT: &str = "1.3.6.1.4.1.8072.1.3.1";

pub fn base_oid() -> Oid {
    oid!(1, 3, 6, 1, 4, 1, 8072, 1, 3, 1)
}

/// OID text for `base + suffix`.
pub fn under_base(suffix: &[u32]) -> String {
    base_oid().append(suffix).to_string()
}

/// Well-known OID outside the base tree (sysDescr.0).
pub fn sys_descr() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)
}

// =============================================================================
// Construction helpers
// =============================================================================

pub fn config(interval: Duration) -> Config {
    Config::builder()
        .base_oid(base_oid())
        .refresh_interval(interval)
        .build()
        .expect("valid test config")
}

pub fn cache_and_registry() -> (Arc<MetricsCache>, Registry) {
    let cache = Arc::new(MetricsCache::new());
    let registry = Registry::new(base_oid(), cache.clone());
    (cache, registry)
}

/// Enable log output for a test run (`RUST_LOG=snmp_passpersist=trace`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
