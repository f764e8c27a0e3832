use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use mockall::mock;

use crate::{
    helpers::TxHash,
    traits::{WalletBackend, WalletError},
};

mock! {
    pub Wallet {}
    impl WalletBackend for Wallet {
        async fn get_confirmations(&self, hash: &TxHash) -> Result<(u32, u32), WalletError>;
    }
}

/// A wallet with a fixed set of known transactions. Unknown transactions produce an RPC error.
#[derive(Default)]
pub struct FixedWallet {
    known: HashMap<TxHash, (u32, u32)>,
    calls: AtomicUsize,
}

impl FixedWallet {
    pub fn with_tx(mut self, txid: &str, confirmations: u32, height: u32) -> Self {
        let hash = txid.parse::<TxHash>().expect("test txid must be valid hex");
        self.known.insert(hash, (confirmations, height));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WalletBackend for FixedWallet {
    async fn get_confirmations(&self, hash: &TxHash) -> Result<(u32, u32), WalletError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.known.get(hash).copied().ok_or_else(|| WalletError::Rpc(format!("transaction {hash} not found")))
    }
}
