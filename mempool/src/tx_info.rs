use std::collections::HashSet;

use txpool_types::{SpecHash, Transaction, TxId};

/// Cached decoded view of one transaction: inputs, outputs, fee, size and the set of addresses
/// it touches, computed once at admission time and never revisited.
///
/// Immutable after construction — every field is derived from `tx` and none of it changes for
/// the lifetime of the entry in `known_txs`.
#[derive(Debug, Clone)]
pub struct TxInfo {
    tx: Transaction,
    involved_addresses: HashSet<SpecHash>,
    fee_density: f64,
}

impl TxInfo {
    /// Decodes `tx` into its cached view. The only failure mode is structural: callers are
    /// expected to have already run `validate_basics` (which is what actually rejects malformed
    /// transactions); this constructor just refuses to wrap something nonsensical.
    pub fn new(tx: Transaction) -> Option<Self> {
        if !tx.is_well_formed() {
            return None;
        }
        let involved_addresses = tx.involved_addresses();
        let fee_density = tx.fee_density();
        Some(Self { tx, involved_addresses, fee_density })
    }

    pub fn id(&self) -> TxId {
        self.tx.id()
    }

    pub fn tx(&self) -> &Transaction {
        &self.tx
    }

    pub fn size_bytes(&self) -> u64 {
        self.tx.size_bytes()
    }

    pub fn fee(&self) -> u64 {
        self.tx.fee()
    }

    pub fn fee_density(&self) -> f64 {
        self.fee_density
    }

    pub fn involved_addresses(&self) -> &HashSet<SpecHash> {
        &self.involved_addresses
    }

    pub fn into_tx(self) -> Transaction {
        self.tx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{tx_spending, GENESIS};

    #[test]
    fn rejects_inputless_or_outputless_tx() {
        let mut tx = tx_spending(GENESIS, 0, 1, 100, 5);
        tx.inputs.clear();
        assert!(TxInfo::new(tx).is_none());
    }

    #[test]
    fn caches_fee_density() {
        let tx = tx_spending(GENESIS, 0, 1, 100, 5);
        let fee = tx.fee;
        let size = tx.size_bytes();
        let info = TxInfo::new(tx).unwrap();
        assert_eq!(info.fee_density(), fee as f64 / size as f64);
    }
}
