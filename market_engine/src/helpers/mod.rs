mod tx_hash;

pub use tx_hash::{canonical_txid, TxHash, TxHashError};
