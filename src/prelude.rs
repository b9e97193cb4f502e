//! Prelude module for convenient imports.
//!
//! ```rust,no_run
//! use snmp_passpersist::prelude::*;
//! ```
//!
//! This imports:
//! - Core types: [`Oid`], [`Value`], [`VarBind`]
//! - Collector surface: [`Collector`], [`BoxFuture`], [`Registry`]
//! - Error handling: [`Error`], [`Result`]
//! - The [`oid!`] macro for compile-time OID construction

pub use crate::collector::{BoxFuture, Collector};
pub use crate::error::{Error, Result};
pub use crate::oid::Oid;
pub use crate::registry::Registry;
pub use crate::value::Value;
pub use crate::varbind::VarBind;

#[doc(no_inline)]
pub use crate::oid;
