use thiserror::Error;

use crate::{currencies::CurrencyLookupError, traits::WalletError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Currency lookup failed. {0}")]
    Lookup(#[from] CurrencyLookupError),
    #[error("Order {0} has no payment details, so its currency is unknown")]
    MissingPayment(String),
    #[error("No wallet is registered for {0}")]
    WalletUnavailable(String),
    #[error("Wallet error. {0}")]
    WalletRpc(#[from] WalletError),
}
