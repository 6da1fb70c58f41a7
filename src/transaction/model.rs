use serde::Serialize;

use super::encoding::{serialize_value, shortest_decimal};
use crate::hash::calculate_hash;

/// A value transfer between two opaque addresses.
///
/// Field names and order are part of the block hash contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Derived from sender, recipient and value; identical transfers share it.
    #[serde(rename = "TransactionID")]
    pub(crate) id: String,
    #[serde(rename = "SenderBlockchainAddress")]
    pub(crate) sender: String,
    #[serde(rename = "RecipientBlockchainAddress")]
    pub(crate) recipient: String,
    #[serde(rename = "Value", serialize_with = "serialize_value")]
    pub(crate) value: f32,
}

impl Transaction {
    /// Build a transaction and compute its id deterministically from its content.
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, value: f32) -> Self {
        let sender = sender.into();
        let recipient = recipient.into();
        let id = Self::derive_id("", &sender, &recipient, value);
        Self {
            id,
            sender,
            recipient,
            value,
        }
    }

    pub(crate) fn derive_id(seed: &str, sender: &str, recipient: &str, value: f32) -> String {
        calculate_hash(format!(
            "{seed}{sender}{recipient}{}",
            shortest_decimal(value)
        ))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}
