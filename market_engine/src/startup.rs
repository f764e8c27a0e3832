//! Sanity checks run once when the node starts.
use log::*;
use thiserror::Error;

use crate::{
    config::EngineConfig,
    multiwallet::{Multiwallet, MultiwalletError},
    notifications::{NotificationError, NotificationType},
    traits::WalletBackend,
};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Notification catalogue is inconsistent. {0}")]
    NotificationCatalogue(#[from] NotificationError),
    #[error("{0}")]
    Multiwallet(#[from] MultiwalletError),
}

/// Refuses to start if the notification catalogue is inconsistent, or if a preferred currency has no wallet.
pub fn startup_checks<W: WalletBackend>(config: &EngineConfig, wallets: &Multiwallet<W>) -> Result<(), StartupError> {
    NotificationType::validate_catalogue()?;
    wallets.validate_preferred_currencies(&config.preferred_currencies)?;
    info!(
        "🪛️ Startup checks passed. Network: {}. {} wallets registered. Preferred currencies: {:?}",
        config.network,
        wallets.len(),
        config.preferred_currencies
    );
    Ok(())
}
