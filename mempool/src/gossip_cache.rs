use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use txpool_types::TxId;

/// Expiring seen-set consulted by [`crate::drivers::gossip_driver::GossipDriver`] before
/// re-broadcasting a sampled transaction, bounding how often the same slowly rotating sample
/// gets resent to peers.
///
/// Backed by an LRU so that under pressure it evicts the least-recently-seen entry rather than
/// refusing inserts; the TTL is enforced on read, not by a background sweep.
pub struct GossipCache {
    seen: LruCache<TxId, Instant>,
    ttl: Duration,
}

impl GossipCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self { seen: LruCache::new(capacity), ttl }
    }

    /// True if `tx_id` was marked seen within the TTL window, as of `now`.
    pub fn is_seen(&mut self, tx_id: &TxId, now: Instant) -> bool {
        match self.seen.get(tx_id) {
            Some(&seen_at) => now.duration_since(seen_at) < self.ttl,
            None => false,
        }
    }

    pub fn mark_seen(&mut self, tx_id: TxId, now: Instant) {
        self.seen.put(tx_id, now);
    }
}
