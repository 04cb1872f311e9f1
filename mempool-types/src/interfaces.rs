use crate::hash::UtxoRoot;
use crate::header::BlockHeader;
use crate::params::NetworkParams;
use crate::tx::{OutPoint, Transaction, UtxoEntry};
use std::collections::{HashMap, HashSet};

/// Read-only access to the persistent UTXO set, addressed by trie root and outpoint. Must be
/// safe to call concurrently with independent readers at arbitrary roots; this core never writes
/// to it.
pub trait UtxoTrie: Send + Sync {
    fn lookup(&self, root: UtxoRoot, outpoint: OutPoint) -> Option<UtxoEntry>;
}

/// Cross-shard export bookkeeping handed to deep validation alongside the shard cover set.
/// Out of scope for this crate: the pool only plumbs it through to `validate_deep`, never
/// constructs or inspects its contents itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExportMap(());

impl ExportMap {
    pub fn new() -> Self {
        Self(())
    }
}

/// Snapshot of consensus facts the pool needs but does not own: which shards this node covers,
/// the current height, the network's policy constants, and the cross-shard export map.
pub trait ChainStateSource: Send + Sync {
    fn shard_id(&self) -> u32;
    /// Immutable after startup.
    fn shard_cover_set(&self) -> &HashSet<u32>;
    fn height(&self) -> u64;
    fn network_params(&self) -> &NetworkParams;
    fn export_map(&self) -> &ExportMap;
}

/// A mutable, in-memory view of the UTXO set used while simulating a cluster. It is a thin
/// overlay over a [`UtxoTrie`] snapshot: inputs consumed and outputs produced by earlier
/// transactions in the cluster shadow the base trie without mutating it.
pub struct UtxoBuffer<'a> {
    base: &'a dyn UtxoTrie,
    root: UtxoRoot,
    added: HashMap<OutPoint, UtxoEntry>,
    spent: HashSet<OutPoint>,
}

impl<'a> UtxoBuffer<'a> {
    pub fn new(base: &'a dyn UtxoTrie, root: UtxoRoot) -> Self {
        Self { base, root, added: HashMap::new(), spent: HashSet::new() }
    }

    /// The unspent entry at `outpoint`, if any — checking the overlay before falling back to the
    /// base trie snapshot.
    pub fn get(&self, outpoint: &OutPoint) -> Option<UtxoEntry> {
        if self.spent.contains(outpoint) {
            return None;
        }
        self.added.get(outpoint).copied().or_else(|| self.base.lookup(self.root, *outpoint))
    }

    pub fn spend(&mut self, outpoint: OutPoint) {
        self.added.remove(&outpoint);
        self.spent.insert(outpoint);
    }

    pub fn insert(&mut self, outpoint: OutPoint, entry: UtxoEntry) {
        self.spent.remove(&outpoint);
        self.added.insert(outpoint, entry);
    }

    /// Consumes `tx`'s inputs and produces its outputs, advancing the simulated UTXO state by
    /// one transaction. Called once per cluster member, in dependency order.
    pub fn apply(&mut self, tx: &Transaction) {
        for input in &tx.inputs {
            self.spend(input.previous_outpoint);
        }
        for (index, output) in tx.outputs.iter().enumerate() {
            let outpoint = OutPoint::new(tx.id, index as u32);
            self.insert(outpoint, UtxoEntry { value: output.value, recipient_spec_hash: output.recipient_spec_hash, target_shard: output.target_shard });
        }
    }
}

/// A rule violation surfaced by the validation collaborator. Opaque to the pool beyond its
/// message: the pool only needs to know validation failed, not why.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Transaction validation, split into a cheap structural pass and an expensive stateful one.
pub trait Validation: Send + Sync {
    /// Pure, stateless checks (well-formedness, signature validity, policy limits). Runs before
    /// the pool lock is taken.
    fn validate_basics(&self, tx: &Transaction) -> Result<(), ValidationError>;

    /// Applies `tx` against `utxo_buffer`, mutating it on success. Run once per transaction while
    /// simulating a cluster in dependency order.
    #[allow(clippy::too_many_arguments)]
    fn validate_deep(
        &self,
        tx: &Transaction,
        utxo_buffer: &mut UtxoBuffer,
        header: &BlockHeader,
        params: &NetworkParams,
        shard_cover_set: &HashSet<u32>,
        export_map: &ExportMap,
    ) -> Result<(), ValidationError>;
}

/// The peer-broadcast surface. May be absent, in which case gossip becomes a no-op.
pub trait Peerage: Send + Sync {
    fn broadcast(&self, tx: &Transaction);
}
