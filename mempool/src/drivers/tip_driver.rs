use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use txpool_rt::task::service::{AsyncService, AsyncServiceFuture};
use txpool_rt::task::tick::{TickReason, TickService};
use txpool_types::UtxoRoot;

use crate::config::DriverConfig;
use crate::pool::MemPool;

const TIP_DRIVER: &str = "mempool-tip-driver";

/// Background worker that notices a new chain tip and triggers a priority-map rebuild.
///
/// Holds a single-slot pending root written by [`Self::on_new_tip`]; each wakeup drains it and
/// rebuilds if a tip arrived since the last pass, coalescing a burst of tip changes into a single
/// rebuild.
pub struct TipDriver {
    pool: Arc<MemPool>,
    tick_service: Arc<TickService>,
    period: Duration,
    tickle_hash: Mutex<Option<UtxoRoot>>,
}

impl TipDriver {
    pub fn new(pool: Arc<MemPool>, config: &DriverConfig) -> Self {
        Self { pool, tick_service: Arc::new(TickService::new()), period: config.clamped_tip_period(), tickle_hash: Mutex::new(None) }
    }

    /// Called by the chain ingestor whenever a new tip is accepted. Overwrites any not-yet-
    /// processed pending root — only the latest tip matters once rebuild runs.
    pub fn on_new_tip(&self, utxo_root: UtxoRoot) {
        *self.tickle_hash.lock() = Some(utxo_root);
    }

    async fn run(self: Arc<Self>) {
        loop {
            match self.tick_service.tick(self.period).await {
                TickReason::Shutdown => break,
                TickReason::Wakeup => {
                    let pending = self.tickle_hash.lock().take();
                    if let Some(root) = pending {
                        self.pool.rebuild_priority_map(root);
                    }
                }
            }
        }
        log::debug!("{TIP_DRIVER} exiting");
    }
}

impl AsyncService for TipDriver {
    fn ident(self: Arc<Self>) -> &'static str {
        TIP_DRIVER
    }

    fn start(self: Arc<Self>) -> AsyncServiceFuture {
        Box::pin(async move { self.run().await })
    }

    fn signal_exit(self: Arc<Self>) {
        self.tick_service.clone().signal_exit();
    }

    fn stop(self: Arc<Self>) -> AsyncServiceFuture {
        Box::pin(async move {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemPoolConfig;
    use crate::test_util::GENESIS;
    use std::collections::HashSet;
    use txpool_types::{
        ChainStateSource, ExportMap, NetworkParams, OutPoint, Transaction, UtxoBuffer, UtxoEntry, UtxoTrie, Validation, ValidationError,
    };

    struct NoopTrie;
    impl UtxoTrie for NoopTrie {
        fn lookup(&self, _root: UtxoRoot, _outpoint: OutPoint) -> Option<UtxoEntry> {
            None
        }
    }

    struct NoopChainState {
        shards: HashSet<u32>,
        params: NetworkParams,
        export_map: ExportMap,
    }
    impl ChainStateSource for NoopChainState {
        fn shard_id(&self) -> u32 {
            0
        }
        fn shard_cover_set(&self) -> &HashSet<u32> {
            &self.shards
        }
        fn height(&self) -> u64 {
            0
        }
        fn network_params(&self) -> &NetworkParams {
            &self.params
        }
        fn export_map(&self) -> &ExportMap {
            &self.export_map
        }
    }

    struct NoopValidation;
    impl Validation for NoopValidation {
        fn validate_basics(&self, _tx: &Transaction) -> Result<(), ValidationError> {
            Ok(())
        }
        fn validate_deep(
            &self,
            _tx: &Transaction,
            _buf: &mut UtxoBuffer,
            _header: &txpool_types::BlockHeader,
            _params: &NetworkParams,
            _shards: &HashSet<u32>,
            _export_map: &ExportMap,
        ) -> Result<(), ValidationError> {
            Ok(())
        }
    }

    /// Signalling shutdown preempts the wakeup sleep regardless of how long the configured
    /// period is, so `start()`'s loop exits promptly instead of waiting out a full period.
    #[tokio::test]
    async fn shutdown_preempts_wakeup() {
        let pool = Arc::new(MemPool::new(
            Arc::new(NoopTrie),
            Arc::new(NoopChainState { shards: HashSet::new(), params: NetworkParams::default(), export_map: ExportMap::new() }),
            Arc::new(NoopValidation),
            None,
            MemPoolConfig::default(),
        ));
        let driver = Arc::new(TipDriver::new(pool, &DriverConfig::default()));
        driver.on_new_tip(GENESIS);

        let handle = tokio::spawn(Arc::clone(&driver).start());
        Arc::clone(&driver).signal_exit();

        tokio::time::timeout(Duration::from_secs(5), handle).await.expect("driver should exit promptly on shutdown").unwrap();
    }
}
