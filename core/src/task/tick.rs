use std::{sync::Arc, time::Duration};
use tokio::select;
use triggered::{trigger, Listener, Trigger};

use super::service::{AsyncService, AsyncServiceFuture};

const TICK: &str = "tick";

/// Why a call to [`TickService::tick`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickReason {
    /// `duration` elapsed; the worker should run its periodic pass.
    Wakeup,
    /// The service was asked to shut down; the worker should exit its loop.
    Shutdown,
}

/// Shared shutdown signal used by every periodic background worker.
///
/// Workers call `tick(period)` at the top of their loop and branch on the result instead of
/// polling a stop flag themselves; `signal_exit` wakes every outstanding `tick` immediately.
pub struct TickService {
    shutdown_trigger: Trigger,
    shutdown_listener: Listener,
}

impl TickService {
    pub fn new() -> Self {
        let (shutdown_trigger, shutdown_listener) = trigger();
        Self { shutdown_trigger, shutdown_listener }
    }

    /// Waits until `duration` has elapsed, or returns immediately if the service has been
    /// signalled to shut down.
    pub async fn tick(&self, duration: Duration) -> TickReason {
        let shutdown_listener = self.shutdown_listener.clone();
        select! {
            biased;
            _ = shutdown_listener => TickReason::Shutdown,
            _ = tokio::time::sleep(duration) => TickReason::Wakeup,
        }
    }
}

impl Default for TickService {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncService for TickService {
    fn ident(self: Arc<Self>) -> &'static str {
        TICK
    }

    fn start(self: Arc<Self>) -> AsyncServiceFuture {
        Box::pin(async move {})
    }

    fn signal_exit(self: Arc<Self>) {
        self.shutdown_trigger.trigger();
    }

    fn stop(self: Arc<Self>) -> AsyncServiceFuture {
        Box::pin(async move {})
    }
}
