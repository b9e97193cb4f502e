//! In-memory host-agent side of a pass_persist session.
//!
//! Runs a `PassPersist` engine on one end of a `tokio::io::duplex` pipe and
//! plays `snmpd` on the other end.

use std::sync::Arc;
use std::time::Duration;

use snmp_passpersist::cache::MetricsCache;
use snmp_passpersist::{Config, PassPersist};
use tokio::io::{
    AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf,
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Harness {
    writer: WriteHalf<DuplexStream>,
    reader: Lines<BufReader<ReadHalf<DuplexStream>>>,
    task: JoinHandle<snmp_passpersist::Result<()>>,
    pub cancel: CancellationToken,
}

impl Harness {
    /// Start an engine serving `cache` under `config`.
    pub fn spawn(config: &Config, cache: Arc<MetricsCache>) -> Self {
        let cancel = CancellationToken::new();
        let engine = PassPersist::new(config, cache, cancel.clone());

        let (client, server) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server);
        let task =
            tokio::spawn(async move { engine.serve(BufReader::new(server_read), server_write).await });

        let (client_read, client_write) = tokio::io::split(client);
        Self {
            writer: client_write,
            reader: BufReader::new(client_read).lines(),
            task,
            cancel,
        }
    }

    /// Write request lines.
    pub async fn send(&mut self, lines: &[&str]) {
        for line in lines {
            self.writer.write_all(line.as_bytes()).await.unwrap();
            self.writer.write_all(b"\n").await.unwrap();
        }
        self.writer.flush().await.unwrap();
    }

    /// Read one reply line.
    pub async fn line(&mut self) -> String {
        tokio::time::timeout(REPLY_TIMEOUT, self.reader.next_line())
            .await
            .expect("reply timed out")
            .expect("read failed")
            .expect("engine closed the stream")
    }

    /// Send a request and collect `reply_lines` lines of reply.
    pub async fn request(&mut self, lines: &[&str], reply_lines: usize) -> Vec<String> {
        self.send(lines).await;
        let mut reply = Vec::with_capacity(reply_lines);
        for _ in 0..reply_lines {
            reply.push(self.line().await);
        }
        reply
    }

    /// `get`, returning either the three reply lines or `["NONE"]`.
    pub async fn get(&mut self, oid: &str) -> Vec<String> {
        self.query("get", oid).await
    }

    /// `getnext`, returning either the three reply lines or `["NONE"]`.
    pub async fn get_next(&mut self, oid: &str) -> Vec<String> {
        self.query("getnext", oid).await
    }

    async fn query(&mut self, command: &str, oid: &str) -> Vec<String> {
        self.send(&[command, oid]).await;
        let first = self.line().await;
        if first == "NONE" {
            return vec![first];
        }
        vec![first, self.line().await, self.line().await]
    }

    /// Close the input side and wait for the engine to finish.
    pub async fn close(self) -> snmp_passpersist::Result<()> {
        let Harness { mut writer, task, .. } = self;
        writer.shutdown().await.unwrap();
        drop(writer);
        tokio::time::timeout(REPLY_TIMEOUT, task)
            .await
            .expect("engine did not stop")
            .expect("engine panicked")
    }

    /// Wait for the engine to finish without closing input.
    pub async fn join(self) -> snmp_passpersist::Result<()> {
        tokio::time::timeout(REPLY_TIMEOUT, self.task)
            .await
            .expect("engine did not stop")
            .expect("engine panicked")
    }
}
