use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Block, Blockchain};
use crate::error::Result;
use crate::transaction::Transaction;

/// Cloneable handle to one chain shared by producers, miners and readers.
///
/// Writers (pool submission, block append) are serialized; readers always
/// see a chain that is not mid-append.
#[derive(Debug, Clone, Default)]
pub struct SharedBlockchain {
    inner: Arc<RwLock<Blockchain>>,
}

impl SharedBlockchain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chain(chain: Blockchain) -> Self {
        Self {
            inner: Arc::new(RwLock::new(chain)),
        }
    }

    /// Read guard; a writer that panicked leaves the chain readable.
    pub fn read(&self) -> RwLockReadGuard<'_, Blockchain> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Blockchain> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a transfer and return a copy of the pooled transaction.
    pub fn add_transaction(
        &self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        value: f32,
    ) -> Result<Transaction> {
        self.write()
            .add_transaction(sender, recipient, value)
            .cloned()
    }

    pub fn verify_chain(&self) -> bool {
        self.read().verify_chain()
    }

    pub fn head_hash(&self) -> String {
        self.read().head_hash()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Owned copy of the chain's blocks at this instant.
    pub fn blocks(&self) -> Vec<Block> {
        self.read().blocks().to_vec()
    }

    /// Owned copy of the pending pool at this instant.
    pub fn pending(&self) -> Vec<Transaction> {
        self.read().pending().to_vec()
    }

    /// Owned copy of the whole chain, pool included.
    pub fn snapshot(&self) -> Blockchain {
        self.read().clone()
    }
}
