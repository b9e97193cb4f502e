//! Dual-buffered metrics cache.
//!
//! Writers stage entries into a private buffer while a refresh is in
//! progress; [`MetricsCache::commit`] promotes the whole staged buffer to
//! the committed generation in one swap. Readers only ever see committed
//! generations, so a query never observes a half-finished refresh.
//!
//! ```
//! use snmp_passpersist::cache::MetricsCache;
//! use snmp_passpersist::{Value, VarBind, oid};
//!
//! let cache = MetricsCache::new();
//! cache.set(VarBind::new(oid!(1, 3, 6, 1, 1), Value::Integer(1)));
//! assert!(cache.get(&oid!(1, 3, 6, 1, 1)).is_none());
//!
//! cache.commit();
//! assert_eq!(cache.get(&oid!(1, 3, 6, 1, 1)).unwrap().value, Value::Integer(1));
//! ```

mod index;

pub use index::OidIndex;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::oid::Oid;
use crate::varbind::VarBind;

/// One committed generation: entries keyed by OID text plus their sorted index.
///
/// The index is built from the entry keys at construction, so the two never
/// disagree.
#[derive(Debug, Default)]
pub struct Snapshot {
    entries: HashMap<String, VarBind>,
    index: OidIndex,
}

impl Snapshot {
    fn from_entries(entries: HashMap<String, VarBind>) -> Self {
        let index = OidIndex::build(entries.values().map(|vb| vb.oid.clone()));
        Self { entries, index }
    }

    /// Exact lookup.
    pub fn get(&self, oid: &Oid) -> Option<&VarBind> {
        self.entries.get(&oid.to_string())
    }

    /// Entry with the smallest OID strictly greater than `oid`.
    pub fn get_next(&self, oid: &Oid) -> Option<&VarBind> {
        let next = self.index.successor(oid)?;
        self.get(next)
    }

    /// The sorted OID index of this generation.
    pub fn index(&self) -> &OidIndex {
        &self.index
    }

    /// Entries in walk order.
    pub fn iter(&self) -> impl Iterator<Item = &VarBind> {
        self.index.iter().filter_map(|oid| self.get(oid))
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the generation is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serializable view of the cache for diagnostics.
#[derive(Debug, serde::Serialize)]
pub struct CacheDump {
    /// Staged entries, sorted by OID.
    pub staged: Vec<VarBind>,
    /// Committed entries in walk order.
    pub committed: Vec<VarBind>,
    /// Committed OIDs in walk order.
    pub index: Vec<Oid>,
}

/// Staged/committed registry of OID to VarBind.
///
/// `set` contends only with other writers and `commit`; `get`/`get_next`
/// contend only with the pointer swap at the end of `commit`.
#[derive(Debug, Default)]
pub struct MetricsCache {
    staged: Mutex<HashMap<String, VarBind>>,
    committed: RwLock<Arc<Snapshot>>,
}

impl MetricsCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an entry, overwriting any entry staged at the same OID.
    pub fn set(&self, varbind: VarBind) {
        let key = varbind.oid.to_string();
        self.staged.lock().insert(key, varbind);
    }

    /// Promote the staged buffer to the committed generation.
    ///
    /// The staged buffer is left empty. Whatever was staged is promoted, even
    /// if that is nothing. Returns the size of the new generation.
    pub fn commit(&self) -> usize {
        // Holding the staged lock for the whole commit serializes commits
        // and keeps late `set` calls out of the generation being built.
        let mut staged = self.staged.lock();
        let snapshot = Arc::new(Snapshot::from_entries(std::mem::take(&mut *staged)));
        let len = snapshot.len();
        *self.committed.write() = snapshot;
        drop(staged);

        tracing::debug!(target: "snmp_passpersist::cache", entries = len, "committed generation");
        len
    }

    /// The current committed generation.
    ///
    /// The returned snapshot stays valid (and unchanged) across later commits.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.committed.read().clone()
    }

    /// Exact lookup in the committed generation.
    pub fn get(&self, oid: &Oid) -> Option<VarBind> {
        self.committed.read().get(oid).cloned()
    }

    /// Successor lookup in the committed generation.
    pub fn get_next(&self, oid: &Oid) -> Option<VarBind> {
        self.committed.read().get_next(oid).cloned()
    }

    /// Number of staged entries.
    pub fn staged_len(&self) -> usize {
        self.staged.lock().len()
    }

    /// Number of committed entries.
    pub fn committed_len(&self) -> usize {
        self.committed.read().len()
    }

    /// Copy the full state for diagnostics.
    pub fn dump(&self) -> CacheDump {
        let mut staged: Vec<VarBind> = self.staged.lock().values().cloned().collect();
        staged.sort_by(|a, b| a.oid.cmp(&b.oid));

        let snapshot = self.snapshot();
        CacheDump {
            staged,
            committed: snapshot.iter().cloned().collect(),
            index: snapshot.index().iter().cloned().collect(),
        }
    }
}
