//! Process configuration.
//!
//! A [`Config`] is built once at startup and shared read-only by the
//! refresher and the protocol engine.
//!
//! ```
//! use std::time::Duration;
//! use snmp_passpersist::Config;
//!
//! # fn main() -> snmp_passpersist::Result<()> {
//! let config = Config::builder()
//!     .base_oid_str(".1.3.6.1.4.1.8072.1.3.1")?
//!     .refresh_interval(Duration::from_secs(30))
//!     .build()?;
//!
//! assert_eq!(config.base_oid().to_string(), "1.3.6.1.4.1.8072.1.3.1");
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use crate::error::{Error, Result};
use crate::oid::Oid;

/// Base OID used when none is supplied: NET-SNMP-PASS-MIB's `netSnmpPassExamples`.
pub const DEFAULT_BASE_OID: &[u32] = &[1, 3, 6, 1, 4, 1, 8072, 1, 3, 1];

/// Refresh interval used when none is supplied.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Immutable runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_oid: Oid,
    refresh_interval: Duration,
}

impl Config {
    /// Start building a configuration from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Root of the served subtree.
    pub fn base_oid(&self) -> &Oid {
        &self.base_oid
    }

    /// Period between population cycles.
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_oid: Oid::from_slice(DEFAULT_BASE_OID),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

/// Builder for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the base OID.
    pub fn base_oid(mut self, oid: Oid) -> Self {
        self.config.base_oid = oid;
        self
    }

    /// Parse and set the base OID from dotted notation.
    pub fn base_oid_str(self, s: &str) -> Result<Self> {
        Ok(self.base_oid(Oid::parse(s)?))
    }

    /// Set the refresh interval.
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.config.refresh_interval = interval;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<Config> {
        if self.config.refresh_interval.is_zero() {
            return Err(Error::config("refresh interval must be non-zero"));
        }
        if self.config.base_oid.is_empty() {
            return Err(Error::config("base OID must not be empty"));
        }
        self.config.base_oid.validate_all()?;
        Ok(self.config)
    }
}
