pub mod config;
pub mod miner;
pub mod stop;

pub use config::NodeConfig;
pub use miner::{MinedBlock, Node};
pub use stop::{StopReason, StopSignal};
