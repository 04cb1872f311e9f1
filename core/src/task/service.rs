use futures_util::future::BoxFuture;
use std::sync::Arc;

pub type AsyncServiceFuture = BoxFuture<'static, ()>;

/// A cooperatively-scheduled background service.
///
/// Every long-running worker in the pool (the tip driver, the gossip driver) implements this
/// trait so it can be started and asked to shut down uniformly, regardless of what it does.
pub trait AsyncService: Send + Sync {
    fn ident(self: Arc<Self>) -> &'static str;
    fn start(self: Arc<Self>) -> AsyncServiceFuture;
    fn signal_exit(self: Arc<Self>);
    fn stop(self: Arc<Self>) -> AsyncServiceFuture;
}
