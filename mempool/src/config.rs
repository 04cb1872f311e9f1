use std::time::Duration;

/// Construction-time pool tunables.
///
/// Network-derived policy constants (`LOW_FEE`, `LOW_FEE_SIZE_IN_BLOCK`) come from
/// [`txpool_types::NetworkParams`] via the `ChainStateSource` collaborator, not from here — those
/// can change with consensus activation; these cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemPoolConfig {
    /// Maximum number of entries in `known_txs`.
    pub mempool_max: usize,
    /// Maximum number of low-fee-density entries tolerated once `mempool_max` pressure appears.
    pub mempool_max_low: usize,
    /// Whether transactions arriving from the peer-to-peer layer (`from_p2p = true`) are
    /// accepted at all.
    pub accepts_p2p_tx: bool,
}

impl Default for MemPoolConfig {
    fn default() -> Self {
        Self { mempool_max: 80_000, mempool_max_low: 5_000, accepts_p2p_tx: true }
    }
}

/// Background-driver timing. Both drivers clamp the configured period into their documented
/// floor/ceiling.
#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    pub tip_driver_period: Duration,
    pub gossip_driver_period: Duration,
    pub gossip_cache_capacity: usize,
    pub gossip_cache_ttl: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tip_driver_period: Duration::from_millis(10_000),
            gossip_driver_period: Duration::from_millis(2_000),
            gossip_cache_capacity: 10_000,
            gossip_cache_ttl: Duration::from_millis(300_000),
        }
    }
}

impl DriverConfig {
    pub const TIP_DRIVER_MIN_PERIOD: Duration = Duration::from_millis(2_500);
    pub const TIP_DRIVER_MAX_PERIOD: Duration = Duration::from_millis(300_000);
    pub const GOSSIP_DRIVER_MIN_PERIOD: Duration = Duration::from_millis(250);
    pub const GOSSIP_DRIVER_MAX_PERIOD: Duration = Duration::from_millis(5_000);

    pub fn clamped_tip_period(&self) -> Duration {
        self.tip_driver_period.clamp(Self::TIP_DRIVER_MIN_PERIOD, Self::TIP_DRIVER_MAX_PERIOD)
    }

    pub fn clamped_gossip_period(&self) -> Duration {
        self.gossip_driver_period.clamp(Self::GOSSIP_DRIVER_MIN_PERIOD, Self::GOSSIP_DRIVER_MAX_PERIOD)
    }
}
