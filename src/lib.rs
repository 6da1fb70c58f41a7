//! Append-only, hash-chained ledger with proof-of-work mining.
//!
//! Transactions are pooled in a [`Blockchain`], batched into [`Block`]s by a
//! [`Node`] and linked by SHA-256 hashes so that rewriting history is
//! detected by [`Blockchain::verify_chain`]. Everything lives in memory.

pub mod blockchain;
pub mod error;
pub mod hash;
pub mod node;
pub mod transaction;

pub use blockchain::{Block, Blockchain, SharedBlockchain};
pub use error::{ChainFault, ConfigError, LedgerError, MiningError, Result};
pub use hash::calculate_hash;
pub use node::{MinedBlock, Node, NodeConfig, StopSignal};
pub use transaction::Transaction;
