pub mod encoding;
pub mod model;

pub use encoding::{serialize_transactions, shortest_decimal};
pub use model::Transaction;
