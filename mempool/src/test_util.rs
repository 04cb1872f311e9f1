//! Shared helpers for unit tests within this crate. Not part of the public API.

use txpool_types::{Hash32, OutPoint, SpecHash, Transaction, TransactionInput, TransactionOutput, TxId};

pub const GENESIS: TxId = Hash32([0u8; 32]);

pub fn hash_byte(b: u8) -> Hash32 {
    let mut bytes = [0u8; 32];
    bytes[31] = b;
    Hash32(bytes)
}

pub fn spec_hash(b: u8) -> SpecHash {
    hash_byte(b)
}

/// Builds a single-input, single-output transaction with id `hash_byte(id)` spending
/// `(src, src_idx)`, producing one output of `value - fee`, with fee `fee` and size `size`.
pub fn tx_spending(src: TxId, src_idx: u32, id: u8, value: u64, fee: u64) -> Transaction {
    let out_value = value.saturating_sub(fee);
    Transaction {
        id: hash_byte(id),
        inputs: smallvec::smallvec![TransactionInput::new(OutPoint::new(src, src_idx), spec_hash(id), vec![0xAB; 4])],
        outputs: smallvec::smallvec![TransactionOutput::new(out_value, spec_hash(id.wrapping_add(1)), 0)],
        fee,
        raw: vec![0u8; 100],
    }
}
