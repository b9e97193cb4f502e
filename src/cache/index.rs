//! Sorted OID index used for successor lookups.

use crate::oid::Oid;

/// Ascending list of the committed OIDs.
///
/// Built once per commit and never mutated afterwards, so lookups are plain
/// binary searches.
#[derive(Debug, Clone, Default)]
pub struct OidIndex {
    oids: Vec<Oid>,
}

impl OidIndex {
    /// Build an index from OIDs in any order. Duplicates are collapsed.
    pub fn build(oids: impl IntoIterator<Item = Oid>) -> Self {
        let mut oids: Vec<Oid> = oids.into_iter().collect();
        oids.sort_unstable();
        oids.dedup();
        Self { oids }
    }

    /// Check whether `oid` is present.
    pub fn contains(&self, oid: &Oid) -> bool {
        self.oids.binary_search(oid).is_ok()
    }

    /// Smallest indexed OID strictly greater than `oid`.
    ///
    /// Returns `None` when the index is empty or `oid` is at or past the last
    /// entry.
    pub fn successor(&self, oid: &Oid) -> Option<&Oid> {
        match self.oids.binary_search(oid) {
            // Exact match, step past it
            Ok(idx) => self.oids.get(idx + 1),
            // Insertion point is the first entry greater than `oid`
            Err(idx) => self.oids.get(idx),
        }
    }

    /// First (smallest) OID in the index.
    pub fn first(&self) -> Option<&Oid> {
        self.oids.first()
    }

    /// Get the number of entries in the index.
    pub fn len(&self) -> usize {
        self.oids.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.oids.is_empty()
    }

    /// Iterate over OIDs in walk order.
    pub fn iter(&self) -> impl Iterator<Item = &Oid> {
        self.oids.iter()
    }
}
