/// Network-wide tunables supplied by the chain-state collaborator. These are consensus
/// parameters, not mempool policy knobs — the mempool reads them but never mutates them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkParams {
    /// Minimum fee density (fee / size) below which a transaction is "low fee" for the purposes
    /// of the low-fee pool quota and the low-fee portion of block assembly.
    pub low_fee: f64,
    /// Default budget, in bytes, reserved for low-fee-density transactions during block
    /// assembly.
    pub low_fee_size_in_block: u64,
    /// Height at which shard-aware transaction versions activate.
    pub activation_height_shards: u64,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self { low_fee: 0.01, low_fee_size_in_block: 50_000, activation_height_shards: 0 }
    }
}
