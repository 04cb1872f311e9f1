use crate::hash::{SpecHash, TxId};
use smallvec::SmallVec;
use std::fmt;

/// Most transactions have one or two inputs/outputs; `SmallVec` keeps that common case off the
/// heap the way `consensus/core`'s transaction types do.
pub type TransactionInputs = SmallVec<[TransactionInput; 2]>;
pub type TransactionOutputs = SmallVec<[TransactionOutput; 2]>;

/// A reference to a specific output of a specific transaction.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct OutPoint {
    pub tx_id: TxId,
    pub index: u32,
}

impl OutPoint {
    pub fn new(tx_id: TxId, index: u32) -> Self {
        Self { tx_id, index }
    }
}

impl fmt::Debug for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {})", self.tx_id, self.index)
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One spent output, referenced by outpoint. `spec_hash` is the spending address's identity —
/// addresses are indexed from inputs as well as outputs (see [`crate::tx::Transaction::involved_addresses`]).
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionInput {
    pub previous_outpoint: OutPoint,
    pub spec_hash: SpecHash,
    pub signature_script: Vec<u8>,
}

impl TransactionInput {
    pub fn new(previous_outpoint: OutPoint, spec_hash: SpecHash, signature_script: Vec<u8>) -> Self {
        Self { previous_outpoint, spec_hash, signature_script }
    }
}

/// One created output.
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionOutput {
    pub value: u64,
    pub recipient_spec_hash: SpecHash,
    pub target_shard: u32,
}

impl TransactionOutput {
    pub fn new(value: u64, recipient_spec_hash: SpecHash, target_shard: u32) -> Self {
        Self { value, recipient_spec_hash, target_shard }
    }
}

/// A confirmed or candidate UTXO-set entry, as returned by the UTXO trie or synthesized by a
/// [`crate::interfaces::UtxoBuffer`] while simulating a cluster.
#[derive(Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UtxoEntry {
    pub value: u64,
    pub recipient_spec_hash: SpecHash,
    pub target_shard: u32,
}

impl From<(&OutPoint, &TransactionOutput)> for UtxoEntry {
    fn from((_, out): (&OutPoint, &TransactionOutput)) -> Self {
        Self { value: out.value, recipient_spec_hash: out.recipient_spec_hash, target_shard: out.target_shard }
    }
}

/// A fully decoded transaction, as handed to the mempool by its caller. `fee` is supplied by the
/// transaction itself (consistent with `validate_basics`/`validate_deep` having already checked
/// `fee == sum(inputs) - sum(outputs)` upstream of the pool).
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Transaction {
    pub id: TxId,
    pub inputs: TransactionInputs,
    pub outputs: TransactionOutputs,
    pub fee: u64,
    /// The transaction's serialized wire form. Its length is `size_bytes()`; the mempool never
    /// interprets its contents beyond that.
    pub raw: Vec<u8>,
}

impl Transaction {
    pub fn id(&self) -> TxId {
        self.id
    }

    pub fn size_bytes(&self) -> u64 {
        self.raw.len() as u64
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    /// `fee / size_bytes`, the mempool's priority metric. Zero-size transactions are malformed
    /// and are rejected before this is ever called.
    pub fn fee_density(&self) -> f64 {
        self.fee as f64 / self.size_bytes() as f64
    }

    /// Every address-spec-hash touched by this transaction: both the spending conditions of its
    /// inputs and the recipients of its outputs. Dropping the input half silently loses wallet
    /// notifications for senders.
    pub fn involved_addresses(&self) -> std::collections::HashSet<SpecHash> {
        self.inputs
            .iter()
            .map(|i| i.spec_hash)
            .chain(self.outputs.iter().map(|o| o.recipient_spec_hash))
            .collect()
    }

    /// Basic structural sanity a decoder would have rejected outright: coinbase-shaped
    /// transactions (no inputs), no outputs, and an empty wire form are all malformed.
    pub fn is_well_formed(&self) -> bool {
        !self.inputs.is_empty() && !self.outputs.is_empty() && !self.raw.is_empty()
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("id", &self.id)
            .field("inputs", &self.inputs.len())
            .field("outputs", &self.outputs.len())
            .field("fee", &self.fee)
            .field("size_bytes", &self.size_bytes())
            .finish()
    }
}
