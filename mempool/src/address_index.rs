use std::collections::{HashMap, HashSet};

use txpool_types::{SpecHash, TxId};

/// `SpecHash → set<TxId>`: every known transaction touching a given address.
///
/// Invariant (enforced by [`crate::pool::MemPool`]): `tx_id ∈ index[addr]` iff `addr` is one of
/// `tx_id`'s involved addresses.
#[derive(Debug, Default)]
pub struct AddressIndex {
    by_addr: HashMap<SpecHash, HashSet<TxId>>,
}

impl AddressIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, addr: SpecHash, tx_id: TxId) {
        self.by_addr.entry(addr).or_default().insert(tx_id);
    }

    pub fn insert_all<'a>(&mut self, addrs: impl IntoIterator<Item = &'a SpecHash>, tx_id: TxId) {
        for addr in addrs {
            self.insert(*addr, tx_id);
        }
    }

    /// Removes `tx_id` from every address it was indexed under. Entries whose set becomes empty
    /// are dropped so the index doesn't grow unboundedly with churn.
    pub fn remove_all<'a>(&mut self, addrs: impl IntoIterator<Item = &'a SpecHash>, tx_id: TxId) {
        for addr in addrs {
            if let Some(set) = self.by_addr.get_mut(addr) {
                set.remove(&tx_id);
                if set.is_empty() {
                    self.by_addr.remove(addr);
                }
            }
        }
    }

    pub fn transactions_for(&self, addr: &SpecHash) -> HashSet<TxId> {
        self.by_addr.get(addr).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::hash_byte;

    #[test]
    fn insert_then_lookup() {
        let mut idx = AddressIndex::new();
        let a = hash_byte(1);
        let tx = hash_byte(2);
        idx.insert(a, tx);
        assert!(idx.transactions_for(&a).contains(&tx));
    }

    #[test]
    fn remove_drops_empty_bucket() {
        let mut idx = AddressIndex::new();
        let a = hash_byte(1);
        let tx = hash_byte(2);
        idx.insert(a, tx);
        idx.remove_all([&a], tx);
        assert!(idx.transactions_for(&a).is_empty());
        assert!(!idx.by_addr.contains_key(&a));
    }
}
