//! History rewriting used only to exercise chain verification.
//!
//! Compiled for unit tests, or for integration tests via the `tamper-sim`
//! feature. Not part of the production API.

use super::Blockchain;
use crate::transaction::Transaction;

pub const TAMPERED_SENDER: &str = "Updated Sender";
pub const TAMPERED_RECIPIENT: &str = "Updated Recipient";
pub const TAMPERED_VALUE: f32 = 99.99;

impl Blockchain {
    /// Rewrite the first transaction of block `index` and rehash only that block.
    ///
    /// Out-of-range indexes and blocks without transactions are silently
    /// ignored. The successor's `previous_hash` is left stale on purpose.
    pub fn change_block(&mut self, index: usize, seed: &str) {
        let Some(block) = self.chain.get_mut(index) else {
            return;
        };
        let Some(first) = block.transactions.first_mut() else {
            return;
        };

        first.id = Transaction::derive_id(seed, &first.sender, &first.recipient, first.value);
        first.sender = TAMPERED_SENDER.to_string();
        first.recipient = TAMPERED_RECIPIENT.to_string();
        first.value = TAMPERED_VALUE;

        // Leave the old hash in place if the block no longer serializes;
        // verification flags it either way.
        if let Ok(hash) = block.compute_hash() {
            block.current_hash = hash;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChainFault;

    fn linked_chain(len: usize) -> Blockchain {
        let mut bc = Blockchain::new();
        for i in 0..len {
            let prev = bc.head_hash();
            bc.add_block(vec![Transaction::new("A", "B", i as f32)], 0, prev)
                .unwrap();
        }
        bc
    }

    #[test]
    fn out_of_range_is_a_no_op() {
        let mut bc = linked_chain(2);
        let before = bc.clone();
        bc.change_block(2, "seed");
        bc.change_block(usize::MAX, "seed");
        assert_eq!(bc.blocks(), before.blocks());
    }

    #[test]
    fn block_without_transactions_is_left_alone() {
        let mut bc = Blockchain::new();
        bc.add_block(vec![], 0, String::new()).unwrap();
        let before = bc.blocks()[0].clone();
        bc.change_block(0, "seed");
        assert_eq!(bc.blocks()[0], before);
    }

    #[test]
    fn rewrites_first_transaction_and_rehashes_block() {
        let mut bc = linked_chain(3);
        let old = bc.blocks()[1].clone();
        bc.change_block(1, "seed");

        let block = &bc.blocks()[1];
        let tx = &block.transactions()[0];
        assert_eq!(tx.sender(), TAMPERED_SENDER);
        assert_eq!(tx.recipient(), TAMPERED_RECIPIENT);
        assert_eq!(tx.value(), TAMPERED_VALUE);
        assert_eq!(tx.id(), Transaction::derive_id("seed", "A", "B", 1.0));
        assert_ne!(block.current_hash(), old.current_hash());
        assert!(block.is_valid());
    }

    #[test]
    fn successor_link_is_left_stale() {
        let mut bc = linked_chain(3);
        bc.change_block(1, "seed");
        assert_eq!(
            bc.verify_chain_detailed(),
            Err(ChainFault::BrokenLink { index: 2 })
        );
    }

    #[test]
    fn tampering_the_first_block_is_caught_at_index_one() {
        let mut bc = linked_chain(2);
        bc.change_block(0, "seed");
        assert!(!bc.verify_chain());
        assert_eq!(
            bc.verify_chain_detailed(),
            Err(ChainFault::BrokenLink { index: 1 })
        );
    }
}
