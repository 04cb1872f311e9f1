use std::collections::HashSet;

use txpool_types::{Transaction, TxId};

/// A dependency-closed, topologically ordered bundle of pool transactions that commit together.
///
/// `txs` places every dependency before its dependents and the cluster's target transaction
/// last. The sequence is only meaningful relative to the UTXO root it was built at — see
/// [`crate::priority_map::PriorityMap`]'s `built_for_root` tag.
#[derive(Debug, Clone)]
pub struct Cluster {
    txs: Vec<Transaction>,
    tx_ids: HashSet<TxId>,
    total_size: u64,
    total_fee: u64,
}

impl Cluster {
    /// `txs` must already be topologically ordered (dependencies before dependents); this just
    /// aggregates the bookkeeping fields. Panics in debug builds would be appropriate for a
    /// caller bug, but since the only caller is [`crate::cluster_builder::ClusterBuilder`] and
    /// the order is established there, this stays a plain constructor.
    pub fn new(txs: Vec<Transaction>) -> Self {
        let tx_ids = txs.iter().map(|t| t.id()).collect();
        let total_size = txs.iter().map(|t| t.size_bytes()).sum();
        let total_fee = txs.iter().map(|t| t.fee()).sum();
        Self { txs, tx_ids, total_size, total_fee }
    }

    pub fn txs(&self) -> &[Transaction] {
        &self.txs
    }

    pub fn tx_ids(&self) -> &HashSet<TxId> {
        &self.tx_ids
    }

    pub fn contains(&self, tx_id: &TxId) -> bool {
        self.tx_ids.contains(tx_id)
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn total_fee(&self) -> u64 {
        self.total_fee
    }

    /// `total_fee / total_size`, used to order clusters in the [`crate::priority_map::PriorityMap`].
    pub fn fee_density(&self) -> f64 {
        self.total_fee as f64 / self.total_size as f64
    }

    /// The target transaction this cluster was built to satisfy — the last entry in `txs`.
    pub fn target_id(&self) -> TxId {
        self.txs.last().expect("a cluster always has at least its target").id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{tx_spending, GENESIS};

    #[test]
    fn aggregates_size_and_fee() {
        let a = tx_spending(GENESIS, 0, 1, 100, 5);
        let b = tx_spending(a.id, 0, 2, 95, 10);
        let cluster = Cluster::new(vec![a.clone(), b.clone()]);
        assert_eq!(cluster.total_size(), a.size_bytes() + b.size_bytes());
        assert_eq!(cluster.total_fee(), 15);
        assert_eq!(cluster.target_id(), b.id);
        assert!(cluster.contains(&a.id));
        assert!(cluster.contains(&b.id));
    }
}
