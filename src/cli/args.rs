//! Command-line arguments for the `snmp-passpersist` binary.

use std::time::Duration;

use clap::Parser;

use crate::config::{Config, DEFAULT_REFRESH_INTERVAL};
use crate::error::Result;

/// net-snmp pass_persist sub-agent.
#[derive(Debug, Parser)]
#[command(name = "snmp-passpersist", version, about)]
pub struct Args {
    /// Base OID of the served subtree (must match the pass_persist line in snmpd.conf).
    #[arg(short = 'b', long = "base-oid", value_name = "OID")]
    pub base_oid: Option<String>,

    /// Refresh interval in seconds.
    #[arg(short = 'i', long = "interval", value_name = "SECS", default_value_t = DEFAULT_REFRESH_INTERVAL.as_secs())]
    pub interval: u64,

    /// Enable debug logging (to stderr).
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Enable trace logging (to stderr).
    #[arg(long = "trace")]
    pub trace: bool,
}

impl Args {
    /// Build the runtime configuration from the parsed arguments.
    pub fn config(&self) -> Result<Config> {
        let mut builder = Config::builder().refresh_interval(Duration::from_secs(self.interval));
        if let Some(ref base) = self.base_oid {
            builder = builder.base_oid_str(base)?;
        }
        builder.build()
    }

    /// Initialize tracing based on verbosity flags.
    ///
    /// Logs go to stderr; stdout carries the protocol. `RUST_LOG` overrides
    /// the flags when set.
    pub fn init_tracing(&self) {
        use tracing_subscriber::EnvFilter;

        let default = if self.trace {
            "snmp_passpersist=trace"
        } else if self.debug {
            "snmp_passpersist=debug"
        } else {
            "snmp_passpersist=warn"
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["snmp-passpersist"]);
        let config = args.config().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "snmp-passpersist",
            "--base-oid",
            ".1.3.6.1.4.1.99999.2",
            "-i",
            "15",
            "--debug",
        ]);
        assert!(args.debug);
        let config = args.config().unwrap();
        assert_eq!(config.base_oid(), &oid!(1, 3, 6, 1, 4, 1, 99999, 2));
        assert_eq!(config.refresh_interval(), Duration::from_secs(15));
    }

    #[test]
    fn test_invalid_values() {
        let args = Args::parse_from(["snmp-passpersist", "--base-oid", "1.3.x"]);
        assert!(args.config().is_err());

        let args = Args::parse_from(["snmp-passpersist", "--interval", "0"]);
        assert!(args.config().is_err());
    }
}
