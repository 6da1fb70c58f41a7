use log::{debug, warn};

use super::Block;
use crate::error::{ChainFault, LedgerError, Result};
use crate::transaction::Transaction;

/// In-memory append-only chain plus the pool of pending transactions.
#[derive(Debug, Clone, Default)]
pub struct Blockchain {
    pub(crate) chain: Vec<Block>,
    pub(crate) pool: Vec<Transaction>,
}

impl Blockchain {
    /// An empty chain: no genesis block, head hash is `""`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a transfer for inclusion in a future block.
    ///
    /// Values that cannot be encoded into a block are refused here rather
    /// than failing every later mining attempt.
    pub fn add_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        value: f32,
    ) -> Result<&Transaction> {
        if !value.is_finite() {
            return Err(LedgerError::NonFiniteValue(value));
        }
        let tx = Transaction::new(sender, recipient, value);
        debug!(
            "POOL - queued tx {} ({} -> {}, {}); pool size now {}",
            tx.id,
            tx.sender,
            tx.recipient,
            tx.value,
            self.pool.len() + 1
        );
        self.pool.push(tx);
        Ok(&self.pool[self.pool.len() - 1])
    }

    /// Append a block built from the given fields.
    ///
    /// The caller is trusted: `previous_hash` is not checked against the head.
    pub fn add_block(
        &mut self,
        transactions: Vec<Transaction>,
        nonce: u64,
        previous_hash: String,
    ) -> Result<&Block> {
        let block = Block::new(transactions, nonce, previous_hash)?;
        debug!(
            "CHAIN - appended block #{} hash={} txs={}",
            self.chain.len(),
            block.current_hash,
            block.transactions.len()
        );
        self.chain.push(block);
        Ok(&self.chain[self.chain.len() - 1])
    }

    /// Walk the chain from index 1 and report the first integrity fault.
    ///
    /// Block 0 is trusted as is; only its hash is used as the link target.
    pub fn verify_chain_detailed(&self) -> std::result::Result<(), ChainFault> {
        for (index, pair) in self.chain.windows(2).enumerate() {
            let (prev, current) = (&pair[0], &pair[1]);
            let index = index + 1;

            match current.compute_hash() {
                Ok(hash) if hash == current.current_hash => {}
                Ok(_) => return Err(ChainFault::HashMismatch { index }),
                Err(_) => return Err(ChainFault::Unserializable { index }),
            }
            if current.previous_hash != prev.current_hash {
                return Err(ChainFault::BrokenLink { index });
            }
        }
        Ok(())
    }

    /// True if every block after the first is intact and linked.
    pub fn verify_chain(&self) -> bool {
        match self.verify_chain_detailed() {
            Ok(()) => true,
            Err(fault) => {
                warn!("CHAIN - verification failed: {fault}");
                false
            }
        }
    }

    /// Hash of the last block, or `""` when the chain is empty.
    pub fn head_hash(&self) -> String {
        self.chain
            .last()
            .map(|b| b.current_hash.clone())
            .unwrap_or_default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.chain.get(index)
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pool
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Drop the oldest `count` pending transactions once they are in a block.
    pub(crate) fn remove_pending(&mut self, count: usize) {
        let count = count.min(self.pool.len());
        self.pool.drain(..count);
        debug!(
            "POOL - removed {} included txs; pool size now {}",
            count,
            self.pool.len()
        );
    }
}
