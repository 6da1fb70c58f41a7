use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors raised while building transactions and blocks.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("transaction value {0} is not a finite number")]
    NonFiniteValue(f32),
    #[error("failed to serialize transactions: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("serialized transactions are not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// First integrity violation found while walking the chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainFault {
    #[error("block {index} hash does not match its contents")]
    HashMismatch { index: usize },
    #[error("block {index} does not link to the hash of its predecessor")]
    BrokenLink { index: usize },
    #[error("block {index} transactions could not be re-serialized")]
    Unserializable { index: usize },
}

impl ChainFault {
    pub fn index(&self) -> usize {
        match self {
            ChainFault::HashMismatch { index }
            | ChainFault::BrokenLink { index }
            | ChainFault::Unserializable { index } => *index,
        }
    }
}

/// Ways a proof-of-work attempt can end without appending a block.
#[derive(Debug, Error)]
pub enum MiningError {
    #[error("mining was cancelled after {attempts} attempts")]
    Cancelled { attempts: u64 },
    #[error("mining timed out after {attempts} attempts")]
    TimedOut { attempts: u64 },
    #[error("chain head moved from {expected:?} to {found:?} while mining")]
    StaleHead { expected: String, found: String },
    #[error("nonce space exhausted without meeting difficulty {difficulty}")]
    NonceSpaceExhausted { difficulty: usize },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Rejected node configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("difficulty {0} exceeds the {max} hex characters of a digest", max = crate::hash::HASH_HEX_LEN)]
    DifficultyTooHigh(usize),
    #[error("miner address must not be empty")]
    EmptyMinerAddress,
    #[error("reward {0} is not a finite number")]
    NonFiniteReward(f32),
}
