//! A registry of wallet backends, keyed by currency code.
use std::{collections::HashMap, fmt::Debug};

use log::*;
use thiserror::Error;

use crate::traits::WalletBackend;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MultiwalletError {
    #[error("preferred coin {0} not found in multiwallet")]
    PreferredCurrencyMissing(String),
}

pub struct Multiwallet<W> {
    wallets: HashMap<String, W>,
}

impl<W> Debug for Multiwallet<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut codes = self.wallets.keys().collect::<Vec<_>>();
        codes.sort();
        write!(f, "Multiwallet ({codes:?})")
    }
}

impl<W> Default for Multiwallet<W> {
    fn default() -> Self {
        Self { wallets: HashMap::new() }
    }
}

impl<W> Multiwallet<W>
where W: WalletBackend
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a wallet backend for the given currency code, replacing any previously registered wallet.
    pub fn register(&mut self, currency_code: &str, wallet: W) -> &mut Self {
        let code = currency_code.to_ascii_uppercase();
        if self.wallets.insert(code.clone(), wallet).is_some() {
            warn!("🔄️ Wallet for {code} has been replaced");
        } else {
            debug!("🔄️ Wallet for {code} registered");
        }
        self
    }

    pub fn with_wallet(mut self, currency_code: &str, wallet: W) -> Self {
        self.register(currency_code, wallet);
        self
    }

    /// Currency codes are matched case-insensitively.
    pub fn wallet_for_currency_code(&self, currency_code: &str) -> Option<&W> {
        self.wallets.get(&currency_code.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    /// Checks that every one of the user's preferred currencies has a wallet behind it.
    pub fn validate_preferred_currencies<S: AsRef<str>>(&self, preferred: &[S]) -> Result<(), MultiwalletError> {
        for code in preferred {
            let code = code.as_ref();
            if self.wallet_for_currency_code(code).is_none() {
                return Err(MultiwalletError::PreferredCurrencyMissing(code.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{helpers::TxHash, traits::WalletError};

    struct NullWallet;

    impl WalletBackend for NullWallet {
        async fn get_confirmations(&self, _hash: &TxHash) -> Result<(u32, u32), WalletError> {
            Ok((0, 0))
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let wallets = Multiwallet::new().with_wallet("tbtc", NullWallet).with_wallet("ZEC", NullWallet);
        assert_eq!(wallets.len(), 2);
        assert!(wallets.wallet_for_currency_code("TBTC").is_some());
        assert!(wallets.wallet_for_currency_code("zec").is_some());
        assert!(wallets.wallet_for_currency_code("BTC").is_none());
    }

    #[test]
    fn preferred_currencies() {
        let wallets = Multiwallet::new().with_wallet("BTC", NullWallet);
        assert!(wallets.validate_preferred_currencies::<&str>(&[]).is_ok());
        assert!(wallets.validate_preferred_currencies(&["BTC"]).is_ok());
        let err = wallets.validate_preferred_currencies(&["BTC", "LTC"]).unwrap_err();
        assert_eq!(err.to_string(), "preferred coin LTC not found in multiwallet");
    }
}
