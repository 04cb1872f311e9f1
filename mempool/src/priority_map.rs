use std::collections::BTreeMap;

use txpool_types::{TxId, UtxoRoot};

use crate::cluster::Cluster;

/// Sort key for the priority map: fee density with a monotonic tiebreak.
///
/// A random per-cluster tiebreak string would also work, but a monotonic insertion counter is
/// equivalent for ordering purposes and keeps assembly order deterministic given identical pool
/// state, which is easy to assert on in tests.
///
/// `density_bits` is `f64::to_bits()` of a value that is always finite and non-negative (fee and
/// size are both non-negative, and zero-size transactions are rejected before a density is ever
/// computed), so unsigned integer comparison of the bit pattern agrees with numeric comparison of
/// the float — no NaN/negative-zero handling is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct PriorityKey {
    density_bits: u64,
    seq: u64,
}

impl PriorityKey {
    fn new(fee_density: f64, seq: u64) -> Self {
        debug_assert!(fee_density.is_finite() && fee_density.is_sign_positive());
        Self { density_bits: fee_density.to_bits(), seq }
    }
}

/// Sorted multimap `fee_density → Cluster`, tagged with the UTXO root it was computed against.
///
/// Any operation that relies on ordering across the whole map (block assembly) must check
/// [`Self::built_for_root`] first; a mismatch means the caller must rebuild before trusting the
/// contents.
pub struct PriorityMap {
    built_for_root: Option<UtxoRoot>,
    entries: BTreeMap<PriorityKey, Cluster>,
    next_seq: u64,
}

impl PriorityMap {
    pub fn new() -> Self {
        Self { built_for_root: None, entries: BTreeMap::new(), next_seq: 0 }
    }

    pub fn built_for_root(&self) -> Option<UtxoRoot> {
        self.built_for_root
    }

    pub fn is_stale_for(&self, root: UtxoRoot) -> bool {
        self.built_for_root != Some(root)
    }

    /// Discards every entry and retags the map for `root`. Called at the start of a rebuild,
    /// before clusters are recomputed against the new root.
    pub fn reset_for(&mut self, root: UtxoRoot) {
        self.entries = BTreeMap::new();
        self.built_for_root = Some(root);
    }

    /// Inserts `cluster` at its current fee density. The insertion counter guarantees no two
    /// clusters ever collide on key, so every insert is observed.
    pub fn insert(&mut self, cluster: Cluster) {
        let key = PriorityKey::new(cluster.fee_density(), self.next_seq);
        self.next_seq += 1;
        self.entries.insert(key, cluster);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clusters in descending fee-density order — the iteration order block assembly and
    /// cluster lookup both require.
    pub fn iter_descending(&self) -> impl DoubleEndedIterator<Item = &Cluster> {
        self.entries.iter().rev().map(|(_, cluster)| cluster)
    }

    /// The first cluster (in descending fee-density order) whose members include `tx_id`.
    pub fn cluster_for(&self, tx_id: &TxId) -> Option<&Cluster> {
        self.iter_descending().find(|cluster| cluster.contains(tx_id))
    }

    /// An owned, descending-order snapshot safe to iterate without holding the pool lock —
    /// block assembly walks this copy rather than the live map.
    pub fn snapshot_descending(&self) -> Vec<Cluster> {
        self.iter_descending().cloned().collect()
    }
}

impl Default for PriorityMap {
    fn default() -> Self {
        Self::new()
    }
}
