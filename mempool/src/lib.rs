//! Transaction mempool: a content-addressed transaction store organized by dependency and fee
//! density, with background drivers that react to chain-tip advance and gossip to peers.
//!
//! The pool itself knows nothing about decoding wire formats, consensus validation, or UTXO
//! storage — those are supplied by the collaborator traits in `txpool_types::interfaces` and
//! passed into [`MemPool::new`].

pub mod address_index;
pub mod cluster;
pub mod cluster_builder;
pub mod config;
pub mod double_spend_index;
pub mod drivers;
pub mod gossip_cache;
pub mod listener;
pub mod pool;
pub mod priority_map;
pub mod tx_info;

#[cfg(test)]
mod test_util;

pub use cluster::Cluster;
pub use cluster_builder::ClusterBuilder;
pub use config::{DriverConfig, MemPoolConfig};
pub use drivers::{GossipDriver, TipDriver};
pub use pool::MemPool;
pub use tx_info::TxInfo;
