//! In-memory mocks for the mempool's external collaborators, in the style of a chain-adapter
//! test double: a UTXO set keyed by root hash behind a lock, plus simple validation and peerage
//! stand-ins, so the pool's own logic can be exercised without a real node.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use txpool_types::{
    BlockHeader, ChainStateSource, ExportMap, Hash32, NetworkParams, OutPoint, Peerage, Transaction, TransactionInput, TransactionOutput,
    TxId, UtxoBuffer, UtxoEntry, UtxoRoot, UtxoTrie, ValidationError,
};

pub fn root(b: u8) -> UtxoRoot {
    let mut bytes = [0u8; 32];
    bytes[0] = b;
    Hash32(bytes)
}

pub fn tx_id(b: u8) -> TxId {
    let mut bytes = [0u8; 32];
    bytes[31] = b;
    Hash32(bytes)
}

pub fn addr(b: u8) -> Hash32 {
    tx_id(b)
}

/// Builds a single-input, single-output transaction spending `(src, src_idx)`, with the given
/// fee and a serialized size padded to `size` bytes so `fee_density` is controllable precisely.
pub fn tx(src: TxId, src_idx: u32, id: u8, value: u64, fee: u64, size: usize) -> Transaction {
    let out_value = value.saturating_sub(fee);
    Transaction {
        id: tx_id(id),
        inputs: smallvec::smallvec![TransactionInput::new(OutPoint::new(src, src_idx), addr(id), vec![0xCD; 4])],
        outputs: smallvec::smallvec![TransactionOutput::new(out_value, addr(id.wrapping_add(100)), 0)],
        fee,
        raw: vec![0u8; size],
    }
}

/// A UTXO trie snapshotted per root: each `rebuild_priority_map` target is a fully independent
/// set of unspent outputs, the way a real trie would look when queried at two different heights.
#[derive(Default)]
pub struct MockTrie {
    by_root: Mutex<HashMap<UtxoRoot, HashMap<OutPoint, UtxoEntry>>>,
}

impl MockTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, root: UtxoRoot, outpoint: OutPoint, entry: UtxoEntry) {
        self.by_root.lock().unwrap().entry(root).or_default().insert(outpoint, entry);
    }
}

impl UtxoTrie for MockTrie {
    fn lookup(&self, root: UtxoRoot, outpoint: OutPoint) -> Option<UtxoEntry> {
        self.by_root.lock().unwrap().get(&root)?.get(&outpoint).copied()
    }
}

pub struct MockChainState {
    pub shards: HashSet<u32>,
    pub height: u64,
    pub params: NetworkParams,
    pub export_map: ExportMap,
}

impl MockChainState {
    pub fn new(shards: impl IntoIterator<Item = u32>) -> Self {
        Self { shards: shards.into_iter().collect(), height: 10, params: NetworkParams::default(), export_map: ExportMap::new() }
    }
}

impl ChainStateSource for MockChainState {
    fn shard_id(&self) -> u32 {
        0
    }

    fn shard_cover_set(&self) -> &HashSet<u32> {
        &self.shards
    }

    fn height(&self) -> u64 {
        self.height
    }

    fn network_params(&self) -> &NetworkParams {
        &self.params
    }

    fn export_map(&self) -> &ExportMap {
        &self.export_map
    }
}

/// Structural checks only at the basics layer; deep validation checks that every input is
/// actually present in the simulated buffer and applies the transaction, mirroring what a real
/// consensus validator would enforce around spend/create balance.
pub struct MockValidation;

impl txpool_types::Validation for MockValidation {
    fn validate_basics(&self, tx: &Transaction) -> Result<(), ValidationError> {
        if !tx.is_well_formed() {
            return Err(ValidationError::new("malformed transaction"));
        }
        Ok(())
    }

    fn validate_deep(
        &self,
        tx: &Transaction,
        utxo_buffer: &mut UtxoBuffer,
        _header: &BlockHeader,
        _params: &NetworkParams,
        _shard_cover_set: &HashSet<u32>,
        _export_map: &ExportMap,
    ) -> Result<(), ValidationError> {
        for input in &tx.inputs {
            if utxo_buffer.get(&input.previous_outpoint).is_none() {
                return Err(ValidationError::new(format!("input {} not present in simulated utxo set", input.previous_outpoint)));
            }
        }
        utxo_buffer.apply(tx);
        Ok(())
    }
}

/// Records every transaction handed to it for broadcast, so gossip tests can assert on what was
/// (or wasn't) sent without a real network.
#[derive(Default)]
pub struct MockPeerage {
    pub broadcasted: Mutex<Vec<TxId>>,
}

impl MockPeerage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl Peerage for MockPeerage {
    fn broadcast(&self, tx: &Transaction) {
        self.broadcasted.lock().unwrap().push(tx.id());
    }
}
