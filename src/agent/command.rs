//! Request lines and reply bodies of the pass_persist protocol.

use std::fmt;

use crate::varbind::VarBind;

/// Reply to a get/getnext that found nothing, or to unknown input.
pub const NONE: &str = "NONE";

/// Reply to every `set`.
pub const NOT_WRITABLE: &str = "not-writable";

/// A command line received while no command is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `PING`: liveness probe.
    Ping,
    /// `get`: next line is the OID.
    Get,
    /// `getnext`: next line is the OID.
    GetNext,
    /// `set`: next two lines are the OID and the `type value` line.
    Set,
    /// `DUMP`: staged and committed state as JSON.
    Dump,
    /// `DUMPCACHE`: committed entries as JSON.
    DumpCache,
    /// `DUMPINDEX`: sorted committed OIDs as JSON.
    DumpIndex,
    /// Anything else.
    Unknown,
}

impl Command {
    /// Classify a command line.
    ///
    /// Trailing whitespace (including the `\r` of CRLF input) is ignored.
    /// Keywords are case-sensitive, as net-snmp sends them.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_passpersist::agent::Command;
    ///
    /// assert_eq!(Command::parse("PING\r"), Command::Ping);
    /// assert_eq!(Command::parse("getnext"), Command::GetNext);
    /// assert_eq!(Command::parse("GET"), Command::Unknown);
    /// ```
    pub fn parse(line: &str) -> Self {
        match line.trim_end() {
            "PING" => Self::Ping,
            "get" => Self::Get,
            "getnext" => Self::GetNext,
            "set" => Self::Set,
            "DUMP" => Self::Dump,
            "DUMPCACHE" => Self::DumpCache,
            "DUMPINDEX" => Self::DumpIndex,
            _ => Self::Unknown,
        }
    }
}

/// A complete reply, written followed by a newline.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// `PONG`
    Pong,
    /// Three-line `<oid>\n<TYPE>\n<value>` body.
    Found(VarBind),
    /// `NONE`
    NotFound,
    /// `not-writable`
    NotWritable,
    /// One line of diagnostic JSON.
    Diagnostic(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Pong => f.write_str("PONG"),
            Reply::Found(vb) => write!(f, "{}", vb),
            Reply::NotFound => f.write_str(NONE),
            Reply::NotWritable => f.write_str(NOT_WRITABLE),
            Reply::Diagnostic(json) => f.write_str(json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;
    use crate::value::Value;

    #[test]
    fn test_parse_keywords() {
        assert_eq!(Command::parse("PING"), Command::Ping);
        assert_eq!(Command::parse("get"), Command::Get);
        assert_eq!(Command::parse("getnext"), Command::GetNext);
        assert_eq!(Command::parse("set"), Command::Set);
        assert_eq!(Command::parse("DUMP"), Command::Dump);
        assert_eq!(Command::parse("DUMPCACHE"), Command::DumpCache);
        assert_eq!(Command::parse("DUMPINDEX"), Command::DumpIndex);
    }

    #[test]
    fn test_parse_tolerates_trailing_whitespace() {
        assert_eq!(Command::parse("get\r"), Command::Get);
        assert_eq!(Command::parse("PING  "), Command::Ping);
    }

    #[test]
    fn test_parse_unknown() {
        for line in ["", "ping", "GETNEXT", " get", "get 1.3.6", "-1"] {
            assert_eq!(Command::parse(line), Command::Unknown, "{line:?}");
        }
    }

    #[test]
    fn test_reply_display() {
        assert_eq!(Reply::Pong.to_string(), "PONG");
        assert_eq!(Reply::NotFound.to_string(), "NONE");
        assert_eq!(Reply::NotWritable.to_string(), "not-writable");
        let vb = VarBind::new(oid!(1, 3, 6, 1, 9), Value::Gauge32(3));
        assert_eq!(Reply::Found(vb).to_string(), "1.3.6.1.9\nGAUGE\n3");
    }
}
