//! pass_persist protocol engine.
//!
//! Reads newline-delimited commands from the host agent and answers them
//! from the committed generation of a [`MetricsCache`].
//!
//! | Request | Reply |
//! |---|---|
//! | `PING` | `PONG` |
//! | `get\n<oid>` | `<oid>\n<TYPE>\n<value>` or `NONE` |
//! | `getnext\n<oid>` | `<oid>\n<TYPE>\n<value>` or `NONE` |
//! | `set\n<oid>\n<type> <value>` | `not-writable` |
//! | anything else | `NONE` |
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use snmp_passpersist::agent::PassPersist;
//! use snmp_passpersist::cache::MetricsCache;
//! use snmp_passpersist::Config;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> snmp_passpersist::Result<()> {
//! let config = Config::default();
//! let engine = PassPersist::new(&config, Arc::new(MetricsCache::new()), CancellationToken::new());
//! engine.run().await
//! # }
//! ```

mod command;

pub use command::{Command, NONE, NOT_WRITABLE, Reply};

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::cache::MetricsCache;
use crate::config::Config;
use crate::error::Result;
use crate::oid::Oid;

/// What the next input line means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Pending {
    #[default]
    Idle,
    Get,
    GetNext,
    SetOid,
    SetValue,
}

/// Protocol engine bound to one cache and base OID.
#[derive(Debug, Clone)]
pub struct PassPersist {
    base: Oid,
    cache: Arc<MetricsCache>,
    cancel: CancellationToken,
}

impl PassPersist {
    /// Create an engine answering for `config.base_oid()` from `cache`.
    pub fn new(config: &Config, cache: Arc<MetricsCache>, cancel: CancellationToken) -> Self {
        Self {
            base: config.base_oid().clone(),
            cache,
            cancel,
        }
    }

    /// Start a new protocol session with no pending command.
    pub fn session(&self) -> Session<'_> {
        Session {
            engine: self,
            pending: Pending::Idle,
        }
    }

    /// Serve standard input / standard output until end of input or cancellation.
    pub async fn run(&self) -> Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve `reader` / `writer` until end of input or cancellation.
    ///
    /// Each reply is flushed as soon as it is written. Only I/O failures are
    /// returned as errors; undecodable or over-long input lines are answered
    /// like any other bad input.
    #[instrument(skip_all, fields(base = %self.base))]
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        let mut session = self.session();

        loop {
            let line = tokio::select! {
                result = read_line(&mut reader, &mut buf) => result?,
                _ = self.cancel.cancelled() => {
                    tracing::info!(target: "snmp_passpersist::agent", "agent shutdown requested");
                    return Ok(());
                }
            };

            let reply = match line {
                Line::Eof => {
                    tracing::info!(target: "snmp_passpersist::agent", "input closed");
                    return Ok(());
                }
                Line::Complete => session.feed(&String::from_utf8_lossy(&buf)),
                Line::TooLong => {
                    tracing::warn!(target: "snmp_passpersist::agent", max = MAX_LINE_LEN, "input line too long, discarded");
                    session.feed("")
                }
            };

            if let Some(reply) = reply {
                let mut out = reply.to_string();
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }
    }

    fn lookup(&self, text: &str, next: bool) -> Reply {
        let oid = match Oid::parse(text.trim()) {
            Ok(oid) => oid,
            Err(e) => {
                tracing::debug!(target: "snmp_passpersist::agent", error = %e, "unparseable query");
                return Reply::NotFound;
            }
        };

        if !self.base.contains(&oid) {
            tracing::debug!(target: "snmp_passpersist::agent", oid = %oid, "query outside base");
            return Reply::NotFound;
        }

        let found = if next {
            // A walk ends at the edge of the base subtree
            self.cache
                .get_next(&oid)
                .filter(|vb| self.base.contains(&vb.oid))
        } else {
            self.cache.get(&oid)
        };

        tracing::trace!(target: "snmp_passpersist::agent", oid = %oid, next, found = found.is_some(), "query");
        found.map(Reply::Found).unwrap_or(Reply::NotFound)
    }

    fn diagnostic(&self, command: Command) -> Reply {
        let dump = self.cache.dump();
        let json = match command {
            Command::DumpCache => serde_json::to_string(&dump.committed),
            Command::DumpIndex => serde_json::to_string(&dump.index),
            _ => serde_json::to_string(&dump),
        };

        match json {
            Ok(json) => Reply::Diagnostic(json),
            Err(e) => {
                tracing::warn!(target: "snmp_passpersist::agent", error = %e, "failed to serialize dump");
                Reply::NotFound
            }
        }
    }
}

/// Longest input line kept; anything past it is discarded.
pub const MAX_LINE_LEN: usize = 8 * 1024;

/// Outcome of reading one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    /// End of input with nothing buffered.
    Eof,
    /// `buf` holds the line without its `\n`.
    Complete,
    /// The line exceeded [`MAX_LINE_LEN`] and was skipped up to its `\n`.
    TooLong,
}

/// Read bytes up to the next `\n` into `buf`, keeping at most
/// [`MAX_LINE_LEN`] of them.
///
/// An unterminated final line is returned as complete.
async fn read_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Line>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let mut overflow = false;

    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(match (overflow, buf.is_empty()) {
                (true, _) => Line::TooLong,
                (false, true) => Line::Eof,
                (false, false) => Line::Complete,
            });
        }

        let (data, used, done) = match available.iter().position(|&b| b == b'\n') {
            Some(pos) => (&available[..pos], pos + 1, true),
            None => (available, available.len(), false),
        };

        let room = MAX_LINE_LEN - buf.len();
        if data.len() > room {
            overflow = true;
        }
        buf.extend_from_slice(&data[..data.len().min(room)]);
        reader.consume(used);

        if done {
            return Ok(if overflow { Line::TooLong } else { Line::Complete });
        }
    }
}

/// Per-stream protocol state.
///
/// Feed it input lines one at a time; it returns the reply to write, if the
/// line completes a request.
#[derive(Debug)]
pub struct Session<'a> {
    engine: &'a PassPersist,
    pending: Pending,
}

impl Session<'_> {
    /// Consume one input line (without its newline).
    pub fn feed(&mut self, line: &str) -> Option<Reply> {
        match std::mem::take(&mut self.pending) {
            Pending::Idle => self.command(Command::parse(line)),
            Pending::Get => Some(self.engine.lookup(line, false)),
            Pending::GetNext => Some(self.engine.lookup(line, true)),
            Pending::SetOid => {
                tracing::debug!(target: "snmp_passpersist::agent", oid = line.trim(), "rejecting set");
                self.pending = Pending::SetValue;
                None
            }
            Pending::SetValue => Some(Reply::NotWritable),
        }
    }

    fn command(&mut self, command: Command) -> Option<Reply> {
        match command {
            Command::Ping => Some(Reply::Pong),
            Command::Get => {
                self.pending = Pending::Get;
                None
            }
            Command::GetNext => {
                self.pending = Pending::GetNext;
                None
            }
            Command::Set => {
                self.pending = Pending::SetOid;
                None
            }
            Command::Dump | Command::DumpCache | Command::DumpIndex => {
                Some(self.engine.diagnostic(command))
            }
            Command::Unknown => Some(Reply::NotFound),
        }
    }
}
