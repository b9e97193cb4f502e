//! Shared test utilities for snmp-passpersist integration tests.

// Allow dead code and unused imports since not all test files use all utilities
#![allow(dead_code)]
#![allow(unused_imports)]

mod fixtures;
mod harness;

pub use fixtures::*;
pub use harness::Harness;
