use serde::Serialize;

use crate::error::Result;
use crate::hash::calculate_hash;
use crate::transaction::{Transaction, serialize_transactions};

/// A batch of transactions chained to its predecessor by hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub(crate) nonce: u64, // Proof-of-Work nonce
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) previous_hash: String, // empty for the first block
    pub(crate) current_hash: String,
}

impl Block {
    /// Build a block and compute its hash over linkage, nonce and transactions.
    pub fn new(transactions: Vec<Transaction>, nonce: u64, previous_hash: String) -> Result<Self> {
        let current_hash = compute_hash(&previous_hash, nonce, &transactions)?;
        Ok(Self {
            nonce,
            transactions,
            previous_hash,
            current_hash,
        })
    }

    /// Recompute the hash from the stored fields (ignores `current_hash`).
    pub fn compute_hash(&self) -> Result<String> {
        compute_hash(&self.previous_hash, self.nonce, &self.transactions)
    }

    /// Whether the cached hash still matches the block's content.
    /// A block whose transactions no longer serialize is never valid.
    pub fn is_valid(&self) -> bool {
        matches!(self.compute_hash(), Ok(hash) if hash == self.current_hash)
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn current_hash(&self) -> &str {
        &self.current_hash
    }
}

/// `Hash(previous_hash ‖ nonce ‖ serialize(transactions))`.
///
/// Shared by block construction and the proof-of-work search.
pub fn compute_hash(previous_hash: &str, nonce: u64, transactions: &[Transaction]) -> Result<String> {
    let txs_json = serialize_transactions(transactions)?;
    Ok(hash_preimage(previous_hash, nonce, &txs_json))
}

pub(crate) fn hash_preimage(previous_hash: &str, nonce: u64, txs_json: &str) -> String {
    calculate_hash(format!("{previous_hash}{nonce}{txs_json}"))
}

#[cfg(test)]
mod tests {
    use super::Block;
    use crate::error::LedgerError;
    use crate::transaction::Transaction;

    #[test]
    fn reward_only_block_matches_reference_vector() {
        let reward = Transaction::new("Reward", "miner", 10.0);
        let b = Block::new(vec![reward], 0, String::new()).unwrap();
        assert_eq!(
            b.current_hash(),
            "4eb3fac5e1db5a85ee9c4fe740dac948e2e06c6755d351718f4ff397083fd7b9"
        );
        assert!(b.is_valid());
    }

    #[test]
    fn hash_depends_on_order_nonce_and_link() {
        let a = Transaction::new("A", "B", 1.5);
        let c = Transaction::new("B", "C", 2.0);
        let base = Block::new(vec![a.clone(), c.clone()], 7, "prev".into()).unwrap();

        let swapped = Block::new(vec![c.clone(), a.clone()], 7, "prev".into()).unwrap();
        let renonced = Block::new(vec![a.clone(), c.clone()], 8, "prev".into()).unwrap();
        let relinked = Block::new(vec![a, c], 7, "other".into()).unwrap();

        assert_ne!(base.current_hash(), swapped.current_hash());
        assert_ne!(base.current_hash(), renonced.current_hash());
        assert_ne!(base.current_hash(), relinked.current_hash());
    }

    #[test]
    fn invalid_when_mutated() {
        let tx = Transaction::new("A", "B", 1.5);
        let mut b = Block::new(vec![tx], 3, "prev".into()).unwrap();
        let old_hash = b.current_hash().to_string();

        // Tampering: append a transaction without rehashing
        b.transactions.push(Transaction::new("x", "y", 1.0));

        assert_ne!(old_hash, b.compute_hash().unwrap());
        assert!(!b.is_valid());
    }

    #[test]
    fn unrepresentable_value_is_a_surfaced_error() {
        let tx = Transaction::new("A", "B", f32::NAN);
        let err = Block::new(vec![tx], 0, String::new()).unwrap_err();
        assert!(matches!(err, LedgerError::Serialization(_)));
    }
}
