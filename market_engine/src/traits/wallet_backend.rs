use thiserror::Error;

use crate::helpers::{TxHash, TxHashError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("Malformed transaction id. {0}")]
    InvalidHash(#[from] TxHashError),
    #[error("Wallet RPC call failed: {0}")]
    Rpc(String),
}

/// The capability the engine needs from a per-currency wallet.
///
/// Implementations talk to a wallet daemon or chain indexer and may block on network I/O. Callers own timeouts and
/// cancellation.
#[allow(async_fn_in_trait)]
pub trait WalletBackend {
    /// Returns `(confirmations, height)` for the transaction with the given hash.
    async fn get_confirmations(&self, hash: &TxHash) -> Result<(u32, u32), WalletError>;
}
