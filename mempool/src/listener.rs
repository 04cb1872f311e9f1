use std::collections::HashSet;

use txpool_types::{SpecHash, Transaction};

/// A callback notified of every newly admitted transaction.
///
/// Invoked while the pool lock is held — implementations must not call back into the pool, and
/// should defer any real work (enqueue and return) rather than do it inline.
pub trait Listener: Send + Sync {
    fn on_new_tx(&self, tx: &Transaction, involved_addresses: &HashSet<SpecHash>);
}

impl<F: Fn(&Transaction, &HashSet<SpecHash>) + Send + Sync> Listener for F {
    fn on_new_tx(&self, tx: &Transaction, involved_addresses: &HashSet<SpecHash>) {
        self(tx, involved_addresses)
    }
}
