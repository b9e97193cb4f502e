//! CLI utilities for snmp-passpersist.
//!
//! This module provides command-line argument parsing and logging setup for
//! the `snmp-passpersist` binary.
//!
//! This module is only available with the `cli` feature.

pub mod args;
