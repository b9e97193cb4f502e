//! Registration surface handed to collectors.
//!
//! Every `add_*` call stages one entry at `base + suffix`. Nothing becomes
//! visible to queries until the refresher commits the cycle.
//!
//! ```
//! use std::sync::Arc;
//! use snmp_passpersist::cache::MetricsCache;
//! use snmp_passpersist::{Registry, oid};
//!
//! # fn main() -> snmp_passpersist::Result<()> {
//! let cache = Arc::new(MetricsCache::new());
//! let registry = Registry::new(oid!(1, 3, 6, 1, 4, 1, 8072, 1, 3, 1), cache.clone());
//!
//! registry.add_string(&[1, 1], "x")?;
//! cache.commit();
//!
//! let vb = cache.get(&oid!(1, 3, 6, 1, 4, 1, 8072, 1, 3, 1, 1, 1)).unwrap();
//! assert_eq!(vb.to_string(), "1.3.6.1.4.1.8072.1.3.1.1.1\nSTRING\nx");
//! # Ok(())
//! # }
//! ```

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use crate::cache::MetricsCache;
use crate::error::Result;
use crate::oid::Oid;
use crate::value::Value;
use crate::varbind::VarBind;

/// Stages values under a fixed base OID.
///
/// Cheap to clone; clones share the same cache.
#[derive(Debug, Clone)]
pub struct Registry {
    base: Oid,
    cache: Arc<MetricsCache>,
}

impl Registry {
    /// Create a registry staging into `cache` under `base`.
    pub fn new(base: Oid, cache: Arc<MetricsCache>) -> Self {
        Self { base, cache }
    }

    /// The base OID every suffix is appended to.
    pub fn base(&self) -> &Oid {
        &self.base
    }

    /// Stage `value` at `base + suffix`.
    ///
    /// Fails only if the resulting OID exceeds [`MAX_OID_LEN`](crate::oid::MAX_OID_LEN) arcs.
    pub fn add(&self, suffix: &[u32], value: Value) -> Result<()> {
        let oid = self.base.append(suffix);
        oid.validate_length()?;
        tracing::trace!(target: "snmp_passpersist::registry", oid = %oid, kind = %value.type_keyword(), "staged");
        self.cache.set(VarBind::new(oid, value));
        Ok(())
    }

    /// Stage a `STRING` value.
    ///
    /// Line breaks in `value` are served as spaces.
    pub fn add_string(&self, suffix: &[u32], value: impl Into<String>) -> Result<()> {
        self.add(suffix, Value::String(value.into()))
    }

    /// Stage an `INTEGER` value.
    pub fn add_int(&self, suffix: &[u32], value: i32) -> Result<()> {
        self.add(suffix, Value::Integer(value))
    }

    /// Stage an `OBJECTID` value.
    pub fn add_oid(&self, suffix: &[u32], value: Oid) -> Result<()> {
        self.add(suffix, Value::ObjectIdentifier(value))
    }

    /// Stage an `OCTET` value.
    ///
    /// The bytes are served as lossy UTF-8 text with line breaks as spaces.
    pub fn add_octet_string(&self, suffix: &[u32], value: impl Into<Bytes>) -> Result<()> {
        self.add(suffix, Value::OctetString(value.into()))
    }

    /// Stage an `IPADDRESS` value.
    pub fn add_ip(&self, suffix: &[u32], value: Ipv4Addr) -> Result<()> {
        self.add(suffix, Value::IpAddress(value))
    }

    /// Stage an IPv6 address (sent as `STRING`).
    pub fn add_ipv6(&self, suffix: &[u32], value: Ipv6Addr) -> Result<()> {
        self.add(suffix, Value::Ipv6Address(value))
    }

    /// Stage a `Counter32` value.
    pub fn add_counter32(&self, suffix: &[u32], value: u32) -> Result<()> {
        self.add(suffix, Value::Counter32(value))
    }

    /// Stage a `Counter64` value.
    pub fn add_counter64(&self, suffix: &[u32], value: u64) -> Result<()> {
        self.add(suffix, Value::Counter64(value))
    }

    /// Stage a `GAUGE` value.
    pub fn add_gauge(&self, suffix: &[u32], value: u32) -> Result<()> {
        self.add(suffix, Value::Gauge32(value))
    }

    /// Stage a `TIMETICKS` value.
    pub fn add_timeticks(&self, suffix: &[u32], value: Duration) -> Result<()> {
        self.add(suffix, Value::TimeTicks(value))
    }
}
