use std::collections::{HashMap, HashSet, VecDeque};

use itertools::Itertools;
use txpool_errors::PoolError;
use txpool_types::{BlockHeader, ExportMap, NetworkParams, OutPoint, Transaction, TxId, UtxoBuffer, UtxoRoot, UtxoTrie, Validation};

use crate::tx_info::TxInfo;
use crate::Cluster;

/// Builds the minimal dependency-closed, topologically ordered bundle of pool transactions
/// needed for `target` to be valid against `built_for_root`.
///
/// Stateless: every input it needs is passed in, so it carries no fields of its own.
pub struct ClusterBuilder;

impl ClusterBuilder {
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        target: &Transaction,
        known_txs: &HashMap<TxId, TxInfo>,
        utxo_trie: &dyn UtxoTrie,
        built_for_root: UtxoRoot,
        validation: &dyn Validation,
        header: &BlockHeader,
        params: &NetworkParams,
        shard_cover_set: &HashSet<u32>,
        export_map: &ExportMap,
    ) -> Result<Cluster, PoolError> {
        let (working_set, deps) = Self::frontier_walk(target, known_txs, utxo_trie, built_for_root, shard_cover_set)?;
        let ordered_ids = Self::topological_order(target.id(), &deps);
        let txs: Vec<Transaction> = ordered_ids
            .into_iter()
            .map(|id| working_set.get(&id).expect("every ordered id was inserted into the working set").clone())
            .collect();

        let mut buffer = UtxoBuffer::new(utxo_trie, built_for_root);
        for tx in &txs {
            validation.validate_deep(tx, &mut buffer, header, params, shard_cover_set, export_map)?;
        }
        Ok(Cluster::new(txs))
    }

    /// Step 1: walk inputs breadth-first, pulling in unconfirmed ancestors from `known_txs` and
    /// recording a dependency edge (consumer → parent) for each. Returns the working set of
    /// transactions touched (target included) and the dependency multimap.
    fn frontier_walk(
        target: &Transaction,
        known_txs: &HashMap<TxId, TxInfo>,
        utxo_trie: &dyn UtxoTrie,
        built_for_root: UtxoRoot,
        shard_cover_set: &HashSet<u32>,
    ) -> Result<(HashMap<TxId, Transaction>, HashMap<TxId, HashSet<TxId>>), PoolError> {
        let mut working_set = HashMap::new();
        let mut deps: HashMap<TxId, HashSet<TxId>> = HashMap::new();
        let mut queue: VecDeque<(TxId, OutPoint)> = VecDeque::new();

        working_set.insert(target.id(), target.clone());
        for input in &target.inputs {
            queue.push_back((target.id(), input.previous_outpoint));
        }

        while let Some((consumer, outpoint)) = queue.pop_front() {
            let src_id = outpoint.tx_id;

            if working_set.contains_key(&src_id) {
                deps.entry(consumer).or_default().insert(src_id);
                continue;
            }

            if utxo_trie.lookup(built_for_root, outpoint).is_some() {
                // Satisfied by confirmed state; no pool dependency to record.
                continue;
            }

            let Some(info) = known_txs.get(&src_id) else {
                return Err(PoolError::UnknownInput { outpoint, src_tx_id: src_id });
            };
            let output = info
                .tx()
                .outputs
                .get(outpoint.index as usize)
                .ok_or(PoolError::UnknownInput { outpoint, src_tx_id: src_id })?;
            if !shard_cover_set.contains(&output.target_shard) {
                return Err(PoolError::CrossShardDependency { outpoint, shard: output.target_shard });
            }

            working_set.insert(src_id, info.tx().clone());
            deps.entry(consumer).or_default().insert(src_id);
            for input in &info.tx().inputs {
                queue.push_back((src_id, input.previous_outpoint));
            }
        }

        Ok((working_set, deps))
    }

    /// Reverse topological sort via an explicit-stack DFS — no recursion, so chain depth is
    /// unbounded. Keeps the minimum (most negative) level seen per tx; a tx is only revisited
    /// through parents if a strictly better level is found, which also guards against a cycle
    /// (a real cycle can't occur in a UTXO graph since outputs must pre-exist their spends, but
    /// the loop guard costs nothing and makes the absence of one an invariant rather than luck).
    fn topological_order(target_id: TxId, deps: &HashMap<TxId, HashSet<TxId>>) -> Vec<TxId> {
        let mut level: HashMap<TxId, i64> = HashMap::new();
        let mut stack = vec![(target_id, 0i64)];
        level.insert(target_id, 0);

        while let Some((id, lvl)) = stack.pop() {
            let Some(parents) = deps.get(&id) else { continue };
            for &parent in parents {
                let candidate = lvl - 1;
                let improves = match level.get(&parent) {
                    Some(&existing) => candidate < existing,
                    None => true,
                };
                if improves {
                    level.insert(parent, candidate);
                    stack.push((parent, candidate));
                }
            }
        }

        level.keys().copied().sorted_by_key(|id| (level[id], *id)).collect()
    }
}
