//! Market Engine
//!
//! The market engine holds the order bookkeeping logic of a marketplace node. It is independent of any particular
//! wallet or transport.
//!
//! The library has four parts:
//! 1. Currency resolution ([`mod@currencies`]). Codes are resolved against testnet, mainnet and fiat registries,
//!    according to the network the node runs on.
//! 2. The ledger API ([`mod@ledger_api`]). Raw wallet events are consolidated into one record per on-chain
//!    transaction, and the refund line for an order is worked out. Wallets are reached through the
//!    [`traits::WalletBackend`] trait and registered in a [`Multiwallet`].
//! 3. Peer message storage ([`traits::MessageStore`]). Protocol messages are persisted idempotently so that failed
//!    deliveries can be retried after a restart. [`SqliteDatabase`] is the SQLite implementation.
//! 4. Notifications ([`mod@notifications`]). The closed set of user-facing notifications and their JSON envelope.
//!
//! Configuration is read from the environment with [`EngineConfig::from_env_or_default`], and
//! [`startup::startup_checks`] should be run before the node begins serving.
pub mod config;
pub mod currencies;
pub mod db_types;
pub mod helpers;
pub mod ledger_api;
pub mod multiwallet;
pub mod notifications;
#[cfg(feature = "sqlite")]
mod sqlite;
pub mod startup;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use config::EngineConfig;
pub use currencies::{CurrencyRegistries, CurrencyResolver, NetworkMode};
pub use ledger_api::{
    errors::LedgerError,
    ledger_flow_api::LedgerApi,
    ledger_objects::{Contract, Order, OrderState, PaymentMethod, RefundRecord, TransactionRecord, WalletTransaction},
};
pub use multiwallet::Multiwallet;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use startup::startup_checks;
