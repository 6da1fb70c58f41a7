use std::env;
use std::time::Duration;

use log::warn;

use crate::blockchain::{DEFAULT_DIFFICULTY, DEFAULT_REWARD};
use crate::error::ConfigError;
use crate::hash::HASH_HEX_LEN;

pub const DEFAULT_MINER_ADDRESS: &str = "miner";

/// Mining parameters of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    /// Required leading hex zeros in the proof hash.
    pub difficulty: usize,
    pub miner_address: String,
    pub reward: f32,
    /// Upper bound for one `mine_block` call; `None` searches until stopped.
    pub mining_timeout: Option<Duration>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            miner_address: DEFAULT_MINER_ADDRESS.to_string(),
            reward: DEFAULT_REWARD,
            mining_timeout: None,
        }
    }
}

impl NodeConfig {
    pub fn new(difficulty: usize, miner_address: impl Into<String>) -> Self {
        Self {
            difficulty,
            miner_address: miner_address.into(),
            ..Self::default()
        }
    }

    pub fn with_reward(mut self, reward: f32) -> Self {
        self.reward = reward;
        self
    }

    pub fn with_mining_timeout(mut self, timeout: Duration) -> Self {
        self.mining_timeout = Some(timeout);
        self
    }

    /// Load `.env` (if any) and read the `LEDGER_*` variables.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset or unparsable
    /// entries fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            difficulty: parse_var(&lookup, "LEDGER_DIFFICULTY").unwrap_or(defaults.difficulty),
            miner_address: lookup("LEDGER_MINER_ADDRESS").unwrap_or(defaults.miner_address),
            reward: parse_var(&lookup, "LEDGER_REWARD").unwrap_or(defaults.reward),
            mining_timeout: parse_var::<u64, _>(&lookup, "LEDGER_MINING_TIMEOUT_MS")
                .map(Duration::from_millis),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.difficulty > HASH_HEX_LEN {
            return Err(ConfigError::DifficultyTooHigh(self.difficulty));
        }
        if self.miner_address.is_empty() {
            return Err(ConfigError::EmptyMinerAddress);
        }
        if !self.reward.is_finite() {
            return Err(ConfigError::NonFiniteReward(self.reward));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("CONFIG - ignoring invalid {key}={raw:?}, using default");
            None
        }
    }
}
