use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use txpool_rt::task::service::{AsyncService, AsyncServiceFuture};
use txpool_rt::task::tick::{TickReason, TickService};

use crate::config::DriverConfig;
use crate::gossip_cache::GossipCache;
use crate::pool::MemPool;

const GOSSIP_DRIVER: &str = "mempool-gossip-driver";

/// Background worker that samples one random pool transaction per period and asks the peer layer
/// to broadcast it, gated by an expiring seen-cache so a slowly rotating sample gets bounded
/// re-broadcast rather than resending the same handful of transactions every tick.
///
/// A no-op if the pool was constructed without a [`txpool_types::Peerage`] collaborator.
pub struct GossipDriver {
    pool: Arc<MemPool>,
    tick_service: Arc<TickService>,
    period: Duration,
    seen: Mutex<GossipCache>,
}

impl GossipDriver {
    pub fn new(pool: Arc<MemPool>, config: &DriverConfig) -> Self {
        Self {
            pool,
            tick_service: Arc::new(TickService::new()),
            period: config.clamped_gossip_period(),
            seen: Mutex::new(GossipCache::new(config.gossip_cache_capacity, config.gossip_cache_ttl)),
        }
    }

    /// Runs one sample-and-maybe-broadcast pass. Exposed so it can be driven directly (outside
    /// the periodic loop) in tests.
    pub fn gossip_once(&self) {
        let Some(peerage) = self.pool.peerage() else { return };
        let Some(tx) = self.pool.random_pool_tx() else { return };

        let now = Instant::now();
        let mut seen = self.seen.lock();
        if seen.is_seen(&tx.id, now) {
            return;
        }
        peerage.broadcast(&tx);
        seen.mark_seen(tx.id, now);
    }

    async fn run(self: Arc<Self>) {
        loop {
            match self.tick_service.tick(self.period).await {
                TickReason::Shutdown => break,
                TickReason::Wakeup => self.gossip_once(),
            }
        }
        log::debug!("{GOSSIP_DRIVER} exiting");
    }
}

impl AsyncService for GossipDriver {
    fn ident(self: Arc<Self>) -> &'static str {
        GOSSIP_DRIVER
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
