#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;

use snmp_passpersist::agent::PassPersist;
use snmp_passpersist::cache::MetricsCache;
use snmp_passpersist::{Config, Registry};
use tokio_util::sync::CancellationToken;

fuzz_target!(|data: &[u8]| {
    let config = Config::default();
    let cache = Arc::new(MetricsCache::new());
    let registry = Registry::new(config.base_oid().clone(), cache.clone());
    let _ = registry.add_int(&[0], 42);
    let _ = registry.add_string(&[1, 0], "fuzz");
    cache.commit();

    let engine = PassPersist::new(&config, cache, CancellationToken::new());
    let mut session = engine.session();

    let text = String::from_utf8_lossy(data);
    for line in text.split('\n') {
        let _ = session.feed(line);
    }
});
