pub mod gossip_driver;
pub mod tip_driver;

pub use gossip_driver::GossipDriver;
pub use tip_driver::TipDriver;
