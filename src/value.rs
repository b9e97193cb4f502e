//! Typed values served over the pass_persist channel.
//!
//! [`Value`] is a closed set of variants. Each one knows its pass_persist
//! type keyword and how to render itself as the third line of a reply.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use bytes::Bytes;

use crate::oid::Oid;

/// Type keyword written on the second line of a pass_persist reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum TypeKeyword {
    #[serde(rename = "STRING")]
    String,
    #[serde(rename = "INTEGER")]
    Integer,
    Counter32,
    Counter64,
    #[serde(rename = "GAUGE")]
    Gauge,
    #[serde(rename = "OCTET")]
    Octet,
    #[serde(rename = "IPADDRESS")]
    IpAddress,
    #[serde(rename = "OBJECTID")]
    ObjectId,
    #[serde(rename = "TIMETICKS")]
    TimeTicks,
}

impl TypeKeyword {
    /// The keyword exactly as net-snmp expects it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Integer => "INTEGER",
            Self::Counter32 => "Counter32",
            Self::Counter64 => "Counter64",
            Self::Gauge => "GAUGE",
            Self::Octet => "OCTET",
            Self::IpAddress => "IPADDRESS",
            Self::ObjectId => "OBJECTID",
            Self::TimeTicks => "TIMETICKS",
        }
    }
}

impl fmt::Display for TypeKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value registered under an OID.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// DisplayString text.
    String(String),

    /// INTEGER (signed 32-bit)
    Integer(i32),

    /// Counter32 (unsigned 32-bit, wrapping)
    Counter32(u32),

    /// Counter64 (unsigned 64-bit, wrapping)
    Counter64(u64),

    /// Gauge32 (unsigned 32-bit, non-wrapping)
    Gauge32(u32),

    /// OCTET STRING. Rendered as its raw bytes read as text; invalid UTF-8
    /// sequences are replaced with U+FFFD.
    OctetString(Bytes),

    /// IpAddress
    IpAddress(Ipv4Addr),

    /// IPv6 address.
    ///
    /// pass_persist has no IPv6 type, so this is sent with the `STRING`
    /// keyword and the textual address as value.
    Ipv6Address(Ipv6Addr),

    /// OBJECT IDENTIFIER
    ObjectIdentifier(Oid),

    /// TimeTicks. Rendered in hundredths of a second; saturates at `u32::MAX`.
    TimeTicks(Duration),
}

impl Value {
    /// The pass_persist type keyword for this value.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_passpersist::{TypeKeyword, Value};
    ///
    /// assert_eq!(Value::Integer(42).type_keyword(), TypeKeyword::Integer);
    /// assert_eq!(Value::Ipv6Address("::1".parse().unwrap()).type_keyword(), TypeKeyword::String);
    /// ```
    pub fn type_keyword(&self) -> TypeKeyword {
        match self {
            Value::String(_) | Value::Ipv6Address(_) => TypeKeyword::String,
            Value::Integer(_) => TypeKeyword::Integer,
            Value::Counter32(_) => TypeKeyword::Counter32,
            Value::Counter64(_) => TypeKeyword::Counter64,
            Value::Gauge32(_) => TypeKeyword::Gauge,
            Value::OctetString(_) => TypeKeyword::Octet,
            Value::IpAddress(_) => TypeKeyword::IpAddress,
            Value::ObjectIdentifier(_) => TypeKeyword::ObjectId,
            Value::TimeTicks(_) => TypeKeyword::TimeTicks,
        }
    }

    /// Render the value as pass_persist text.
    ///
    /// Same as `to_string()`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Convert a duration to TimeTicks (hundredths of a second), saturating.
    pub fn duration_to_ticks(duration: Duration) -> u32 {
        u32::try_from(duration.as_millis() / 10).unwrap_or(u32::MAX)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write_single_line(f, s),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Counter32(v) | Value::Gauge32(v) => write!(f, "{}", v),
            Value::Counter64(v) => write!(f, "{}", v),
            Value::OctetString(bytes) => write_single_line(f, &String::from_utf8_lossy(bytes)),
            Value::IpAddress(addr) => write!(f, "{}", addr),
            Value::Ipv6Address(addr) => write!(f, "{}", addr),
            Value::ObjectIdentifier(oid) => write!(f, "{}", oid),
            Value::TimeTicks(d) => write!(f, "{}", Value::duration_to_ticks(*d)),
        }
    }
}

/// Write `text` with every `\r` and `\n` replaced by a space.
///
/// A reply is exactly three lines, so a value may not contain line breaks.
fn write_single_line(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let mut parts = text.split(['\r', '\n']);
    if let Some(first) = parts.next() {
        f.write_str(first)?;
    }
    for part in parts {
        f.write_str(" ")?;
        f.write_str(part)?;
    }
    Ok(())
}

impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Oid> for Value {
    fn from(oid: Oid) -> Self {
        Value::ObjectIdentifier(oid)
    }
}

impl From<Ipv4Addr> for Value {
    fn from(addr: Ipv4Addr) -> Self {
        Value::IpAddress(addr)
    }
}

impl From<Ipv6Addr> for Value {
    fn from(addr: Ipv6Addr) -> Self {
        Value::Ipv6Address(addr)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::TimeTicks(d)
    }
}
