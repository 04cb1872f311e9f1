use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use rand::seq::IteratorRandom;

use txpool_errors::PoolError;
use txpool_types::{BlockHeader, ChainStateSource, Peerage, SpecHash, Transaction, TxId, UtxoRoot, UtxoTrie, Validation};

use crate::address_index::AddressIndex;
use crate::cluster_builder::ClusterBuilder;
use crate::config::MemPoolConfig;
use crate::double_spend_index::DoubleSpendIndex;
use crate::listener::Listener;
use crate::priority_map::PriorityMap;
use crate::tx_info::TxInfo;

struct PoolState {
    known_txs: HashMap<TxId, TxInfo>,
    double_spend_index: DoubleSpendIndex,
    address_index: AddressIndex,
    priority_map: PriorityMap,
}

impl PoolState {
    fn new() -> Self {
        Self {
            known_txs: HashMap::new(),
            double_spend_index: DoubleSpendIndex::new(),
            address_index: AddressIndex::new(),
            priority_map: PriorityMap::new(),
        }
    }
}

/// The transaction mempool: admission, dependency clustering, fee-density priority, and
/// block-candidate assembly.
///
/// A single [`parking_lot::Mutex`] — the pool lock — serializes every mutation and read of
/// `known_txs`, both indices, and the priority map. Cluster construction may block on UTXO-trie
/// I/O while the lock is held; releasing it mid-cluster would let a second admission observe a
/// half-built cluster and void the double-spend invariant, so the tradeoff is accepted here.
pub struct MemPool {
    state: Mutex<PoolState>,
    utxo_trie: Arc<dyn UtxoTrie>,
    chain_state: Arc<dyn ChainStateSource>,
    validation: Arc<dyn Validation>,
    peerage: Option<Arc<dyn Peerage>>,
    listeners: Mutex<Vec<Arc<dyn Listener>>>,
    config: MemPoolConfig,
}

impl MemPool {
    pub fn new(
        utxo_trie: Arc<dyn UtxoTrie>,
        chain_state: Arc<dyn ChainStateSource>,
        validation: Arc<dyn Validation>,
        peerage: Option<Arc<dyn Peerage>>,
        config: MemPoolConfig,
    ) -> Self {
        Self { state: Mutex::new(PoolState::new()), utxo_trie, chain_state, validation, peerage, listeners: Mutex::new(Vec::new()), config }
    }

    pub fn register_listener(&self, listener: Arc<dyn Listener>) {
        self.listeners.lock().push(listener);
    }

    pub fn peerage(&self) -> Option<&Arc<dyn Peerage>> {
        self.peerage.as_ref()
    }

    /// `validate_basics` runs before the pool lock is taken; everything after is under lock.
    /// Returns `Ok(false)` for the non-error "already known" / "p2p rejected" cases, matching the
    /// boolean-return convention used for expected no-ops; real faults come back as `Err`.
    pub fn admit(&self, tx: Transaction, from_p2p: bool) -> Result<bool, PoolError> {
        self.validation.validate_basics(&tx).map_err(|e| PoolError::MalformedTx(e.to_string()))?;

        if from_p2p && !self.config.accepts_p2p_tx {
            return Ok(false);
        }

        let mut state = self.state.lock();

        if state.known_txs.contains_key(&tx.id()) {
            return Ok(false);
        }

        if state.known_txs.len() >= self.config.mempool_max {
            return Err(PoolError::PoolFull { len: state.known_txs.len(), max: self.config.mempool_max });
        }

        let info = TxInfo::new(tx.clone()).ok_or_else(|| PoolError::MalformedTx("transaction failed structural checks".into()))?;
        let params = *self.chain_state.network_params();

        if info.fee_density() < params.low_fee && state.known_txs.len() >= self.config.mempool_max_low {
            return Err(PoolError::PoolFullLowFee { len: state.known_txs.len(), max: self.config.mempool_max_low });
        }

        for input in &tx.inputs {
            if let Some(claimant) = state.double_spend_index.claimant(&input.previous_outpoint) {
                if claimant != tx.id() {
                    return Err(PoolError::DoubleSpend { outpoint: input.previous_outpoint, claimed_by: claimant });
                }
            }
        }

        let cluster = match state.priority_map.built_for_root() {
            Some(root) => {
                let header = BlockHeader::next(self.chain_state.height(), txpool_rt::time::unix_now(), params.activation_height_shards);
                let shard_cover_set = self.chain_state.shard_cover_set();
                let export_map = self.chain_state.export_map();
                Some(ClusterBuilder::build(
                    &tx,
                    &state.known_txs,
                    self.utxo_trie.as_ref(),
                    root,
                    self.validation.as_ref(),
                    &header,
                    &params,
                    shard_cover_set,
                    export_map,
                )?)
            }
            None => None,
        };

        let involved = info.involved_addresses().clone();
        for input in &tx.inputs {
            state.double_spend_index.claim(input.previous_outpoint, tx.id());
        }
        state.address_index.insert_all(involved.iter(), tx.id());
        state.known_txs.insert(tx.id(), info);
        if let Some(cluster) = cluster {
            state.priority_map.insert(cluster);
        }

        for listener in self.listeners.lock().iter() {
            listener.on_new_tx(&tx, &involved);
        }

        Ok(true)
    }

    /// Garbage-collects confirmed-or-invalidated transactions: anything that no longer clusters
    /// against `new_root` is dropped from every index, freeing its claimed outpoints.
    pub fn rebuild_priority_map(&self, new_root: UtxoRoot) {
        let mut state = self.state.lock();
        self.rebuild_locked(&mut state, new_root);
    }

    /// The body of a rebuild, run while `state` is already held. Pulled out so
    /// [`Self::assemble_block`] can check-then-rebuild-then-snapshot under one continuous lock
    /// acquisition instead of three separate ones — otherwise a concurrent rebuild for a
    /// different root could retag `built_for_root` in between, and the snapshot taken afterward
    /// would silently belong to the wrong root.
    fn rebuild_locked(&self, state: &mut PoolState, new_root: UtxoRoot) {
        state.priority_map.reset_for(new_root);

        let params = *self.chain_state.network_params();
        let header = BlockHeader::next(self.chain_state.height(), txpool_rt::time::unix_now(), params.activation_height_shards);
        let shard_cover_set = self.chain_state.shard_cover_set().clone();
        let export_map = self.chain_state.export_map();

        let mut built_clusters = Vec::new();
        let mut to_remove = Vec::new();

        for info in state.known_txs.values() {
            match ClusterBuilder::build(
                info.tx(),
                &state.known_txs,
                self.utxo_trie.as_ref(),
                new_root,
                self.validation.as_ref(),
                &header,
                &params,
                &shard_cover_set,
                export_map,
            ) {
                Ok(cluster) => built_clusters.push(cluster),
                Err(e) => {
                    log::debug!("dropping {} from mempool on rebuild: {}", info.id(), e);
                    to_remove.push(info.id());
                }
            }
        }

        for cluster in built_clusters {
            state.priority_map.insert(cluster);
        }

        for tx_id in to_remove {
            if let Some(info) = state.known_txs.remove(&tx_id) {
                let outpoints: Vec<_> = info.tx().inputs.iter().map(|i| i.previous_outpoint).collect();
                state.double_spend_index.release_all(tx_id, outpoints.iter());
                state.address_index.remove_all(info.involved_addresses().iter(), tx_id);
            }
        }
    }

    /// Rebuilds first if `utxo_root` doesn't match the map's current tag, then drains a snapshot
    /// of the priority map in descending fee-density order, skipping clusters that would
    /// overflow `max_bytes` or the low-fee budget, and deduplicating transactions shared across
    /// clusters.
    ///
    /// The check, the rebuild, and the snapshot all happen under one lock acquisition so a
    /// concurrent tip-triggered rebuild for a different root can't retag `built_for_root` in
    /// between — the snapshot taken here is always the one tagged for `utxo_root`.
    pub fn assemble_block(&self, utxo_root: UtxoRoot, max_bytes: u64) -> Vec<Transaction> {
        let mut state = self.state.lock();
        if state.priority_map.is_stale_for(utxo_root) {
            self.rebuild_locked(&mut state, utxo_root);
        }
        let snapshot = state.priority_map.snapshot_descending();
        drop(state);

        let params = *self.chain_state.network_params();
        let low_fee_max = params.low_fee_size_in_block;

        let mut emitted = HashSet::new();
        let mut result = Vec::new();
        let mut cumulative_size: u64 = 0;
        let mut low_fee_bytes_used: u64 = 0;

        for cluster in &snapshot {
            if cumulative_size + cluster.total_size() > max_bytes {
                continue;
            }
            let is_low_fee = cluster.fee_density() < params.low_fee;
            if is_low_fee && low_fee_bytes_used >= low_fee_max {
                continue;
            }

            for tx in cluster.txs() {
                if emitted.insert(tx.id()) {
                    cumulative_size += tx.size_bytes();
                    if is_low_fee {
                        low_fee_bytes_used += tx.size_bytes();
                    }
                    result.push(tx.clone());
                }
            }
        }

        result
    }

    pub fn get_transaction(&self, tx_id: &TxId) -> Option<Transaction> {
        self.state.lock().known_txs.get(tx_id).map(|info| info.tx().clone())
    }

    pub fn pool_size(&self) -> usize {
        self.state.lock().known_txs.len()
    }

    pub fn pool_hashes(&self) -> Vec<TxId> {
        self.state.lock().known_txs.keys().copied().collect()
    }

    pub fn transactions_for_address(&self, addr: &SpecHash) -> HashSet<TxId> {
        self.state.lock().address_index.transactions_for(addr)
    }

    /// The first cluster in priority order (descending fee density) whose members include
    /// `tx_id`, if one exists in the current priority map.
    pub fn cluster_for(&self, tx_id: &TxId) -> Option<Vec<Transaction>> {
        self.state.lock().priority_map.cluster_for(tx_id).map(|cluster| cluster.txs().to_vec())
    }

    /// Samples one transaction from the pool uniformly at random, for the gossip driver.
    pub fn random_pool_tx(&self) -> Option<Transaction> {
        let state = self.state.lock();
        let mut rng = rand::thread_rng();
        state.known_txs.values().choose(&mut rng).map(|info| info.tx().clone())
    }
}
