use std::collections::HashMap;

use txpool_types::{OutPoint, TxId};

/// `OutPoint → TxId`: which known transaction, if any, claims a given input.
///
/// Invariants (enforced by [`crate::pool::MemPool`], not by this type itself): for every known
/// tx `T`, every input of `T` maps here to `T`; no two distinct known txs share an `OutPoint`.
#[derive(Debug, Default)]
pub struct DoubleSpendIndex {
    claims: HashMap<OutPoint, TxId>,
}

impl DoubleSpendIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The transaction currently claiming `outpoint`, if any.
    pub fn claimant(&self, outpoint: &OutPoint) -> Option<TxId> {
        self.claims.get(outpoint).copied()
    }

    /// Records that `tx_id` claims `outpoint`. Callers must have already checked for conflicts
    /// via [`Self::claimant`] — this overwrites unconditionally.
    pub fn claim(&mut self, outpoint: OutPoint, tx_id: TxId) {
        self.claims.insert(outpoint, tx_id);
    }

    /// Releases every outpoint in `outpoints`, but only if it is still claimed by `tx_id` — a
    /// defensive check, since a transaction's claims never change once admitted.
    pub fn release_all<'a>(&mut self, tx_id: TxId, outpoints: impl IntoIterator<Item = &'a OutPoint>) {
        for outpoint in outpoints {
            if self.claims.get(outpoint) == Some(&tx_id) {
                self.claims.remove(outpoint);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
