//! Error kinds surfaced by the transaction mempool, both from admission and from cluster
//! construction (a failed cluster build is reported through the same enum, since `admit`
//! propagates it verbatim as a rejection).

use txpool_types::{interfaces::ValidationError, OutPoint, TxId};

#[derive(Debug, Clone, thiserror::Error)]
pub enum PoolError {
    /// Decoding or basic structural invariants failed.
    #[error("malformed transaction: {0}")]
    MalformedTx(String),

    /// `known_txs.len() >= MEM_POOL_MAX`.
    #[error("mempool is full ({len} of {max} max entries)")]
    PoolFull { len: usize, max: usize },

    /// Fee density is below `LOW_FEE` and the low-fee quota is exhausted.
    #[error("mempool low-fee quota is full ({len} of {max} max low-fee entries)")]
    PoolFullLowFee { len: usize, max: usize },

    /// An input's outpoint is already claimed by a different transaction.
    #[error("input {outpoint} already claimed by transaction {claimed_by}")]
    DoubleSpend { outpoint: OutPoint, claimed_by: TxId },

    /// An input references a transaction this node knows nothing about: neither the UTXO trie
    /// nor the pool has it.
    #[error("input {outpoint} references unknown transaction {src_tx_id}")]
    UnknownInput { outpoint: OutPoint, src_tx_id: TxId },

    /// An ancestor's output lives in a shard this node does not cover.
    #[error("input {outpoint} depends on shard {shard}, which this node does not cover")]
    CrossShardDependency { outpoint: OutPoint, shard: u32 },

    /// Deep validation failed while simulating the cluster.
    #[error("cluster failed deep validation: {0}")]
    InvalidCluster(#[from] ValidationError),
}

impl PoolError {
    /// A short, stable tag for metrics/logging — mirrors the "Kind" column of the error table.
    pub fn kind(&self) -> &'static str {
        match self {
            PoolError::MalformedTx(_) => "malformed_tx",
            PoolError::PoolFull { .. } => "pool_full",
            PoolError::PoolFullLowFee { .. } => "pool_full_low_fee",
            PoolError::DoubleSpend { .. } => "double_spend",
            PoolError::UnknownInput { .. } => "unknown_input",
            PoolError::CrossShardDependency { .. } => "cross_shard_dependency",
            PoolError::InvalidCluster(_) => "invalid_cluster",
        }
    }
}
