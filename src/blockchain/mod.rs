pub mod block;
pub mod model;
pub mod shared;
#[cfg(any(test, feature = "tamper-sim"))]
pub mod tamper;

pub use block::Block;
pub use model::Blockchain;
pub use shared::SharedBlockchain;

/// Default Proof-of-Work difficulty (number of leading hex zeros).
pub const DEFAULT_DIFFICULTY: usize = 3;

/// Fixed amount credited to the miner of each block.
pub const DEFAULT_REWARD: f32 = 10.0;

/// Sender label of the reward transaction closing every mined block.
pub const REWARD_SENDER: &str = "Reward";
