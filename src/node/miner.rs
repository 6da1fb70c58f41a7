use log::{debug, info, warn};

use super::{NodeConfig, StopReason, StopSignal};
use crate::blockchain::block::hash_preimage;
use crate::blockchain::{REWARD_SENDER, SharedBlockchain};
use crate::error::{ConfigError, LedgerError, MiningError};
use crate::hash::hash_meets_difficulty;
use crate::transaction::{Transaction, serialize_transactions};

/// How many nonces are tried between two polls of the stop signal.
pub const STOP_POLL_INTERVAL: u64 = 1024;

/// Outcome of a successful `mine_block`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinedBlock {
    pub index: usize,
    pub nonce: u64,
    /// Stored hash of the appended block (covers the reward transaction).
    pub hash: String,
    /// Hash that met the difficulty (covers only the selected transactions).
    pub proof_hash: String,
    pub transactions: usize,
}

/// Head hash and pending transactions captured for one mining attempt.
#[derive(Debug, Clone)]
struct BlockTemplate {
    previous_hash: String,
    transactions: Vec<Transaction>,
    txs_json: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ProofOfWork {
    nonce: u64,
    hash: String,
}

/// A miner over a (possibly shared) chain.
///
/// The chain owns the pending pool; the node keeps no transaction list of
/// its own and always mines from a snapshot of that pool.
#[derive(Debug, Clone)]
pub struct Node {
    blockchain: SharedBlockchain,
    config: NodeConfig,
}

impl Node {
    /// A node mining on a fresh, empty chain.
    pub fn new(config: NodeConfig) -> Result<Self, ConfigError> {
        Self::with_blockchain(SharedBlockchain::new(), config)
    }

    /// A node mining on an existing chain, possibly shared with other nodes.
    pub fn with_blockchain(
        blockchain: SharedBlockchain,
        config: NodeConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { blockchain, config })
    }

    pub fn blockchain(&self) -> &SharedBlockchain {
        &self.blockchain
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn add_transaction(
        &self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        value: f32,
    ) -> Result<Transaction, LedgerError> {
        self.blockchain.add_transaction(sender, recipient, value)
    }

    pub fn verify_blockchain(&self) -> bool {
        self.blockchain.verify_chain()
    }

    /// Mine one block from the current pool, bounded by the configured timeout.
    pub fn mine_block(&self) -> Result<MinedBlock, MiningError> {
        let stop = match self.config.mining_timeout {
            Some(timeout) => StopSignal::with_timeout(timeout),
            None => StopSignal::new(),
        };
        self.mine_block_until(&stop)
    }

    /// Mine one block from the current pool until `stop` fires.
    ///
    /// On success the chain grows by exactly one block holding the pooled
    /// transactions followed by one reward transaction, and those pooled
    /// transactions leave the pool. On any error the chain is untouched.
    pub fn mine_block_until(&self, stop: &StopSignal) -> Result<MinedBlock, MiningError> {
        let template = self.template()?;
        debug!(
            "MINER - searching: head={:?} txs={} diff={}",
            template.previous_hash,
            template.transactions.len(),
            self.config.difficulty
        );
        let pow = search_nonce(
            &template.previous_hash,
            &template.txs_json,
            self.config.difficulty,
            stop,
        )?;
        self.commit(template, pow)
    }

    fn template(&self) -> Result<BlockTemplate, LedgerError> {
        let (previous_hash, transactions) = {
            let chain = self.blockchain.read();
            (chain.head_hash(), chain.pending().to_vec())
        };
        let txs_json = serialize_transactions(&transactions)?;
        Ok(BlockTemplate {
            previous_hash,
            transactions,
            txs_json,
        })
    }

    fn commit(&self, template: BlockTemplate, pow: ProofOfWork) -> Result<MinedBlock, MiningError> {
        let BlockTemplate {
            previous_hash,
            mut transactions,
            ..
        } = template;
        let included = transactions.len();
        transactions.push(Transaction::new(
            REWARD_SENDER,
            self.config.miner_address.clone(),
            self.config.reward,
        ));

        let mut chain = self.blockchain.write();
        let head = chain.head_hash();
        if head != previous_hash {
            warn!("MINER - stale template: head moved from {previous_hash:?} to {head:?}");
            return Err(MiningError::StaleHead {
                expected: previous_hash,
                found: head,
            });
        }

        let hash = chain
            .add_block(transactions, pow.nonce, previous_hash)?
            .current_hash()
            .to_string();
        chain.remove_pending(included);

        let mined = MinedBlock {
            index: chain.len() - 1,
            nonce: pow.nonce,
            hash,
            proof_hash: pow.hash,
            transactions: included + 1,
        };
        info!(
            "MINER - sealed block #{} (nonce={}, hash={}, proof={})",
            mined.index, mined.nonce, mined.hash, mined.proof_hash
        );
        Ok(mined)
    }
}

/// Brute-force the first nonce whose hash meets `difficulty`.
///
/// `stop` is polled every `STOP_POLL_INTERVAL` nonces, starting before nonce 0.
fn search_nonce(
    previous_hash: &str,
    txs_json: &str,
    difficulty: usize,
    stop: &StopSignal,
) -> Result<ProofOfWork, MiningError> {
    let mut nonce: u64 = 0;
    loop {
        if nonce % STOP_POLL_INTERVAL == 0 {
            if let Some(reason) = stop.stop_reason() {
                let attempts = nonce;
                return Err(match reason {
                    StopReason::Cancelled => MiningError::Cancelled { attempts },
                    StopReason::DeadlineReached => MiningError::TimedOut { attempts },
                });
            }
        }

        let hash = hash_preimage(previous_hash, nonce, txs_json);
        if hash_meets_difficulty(&hash, difficulty) {
            return Ok(ProofOfWork { nonce, hash });
        }
        nonce = nonce
            .checked_add(1)
            .ok_or(MiningError::NonceSpaceExhausted { difficulty })?;
    }
}
