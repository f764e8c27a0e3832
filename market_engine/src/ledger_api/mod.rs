//! # Ledger API
//!
//! The `ledger_api` module turns what wallets observe on-chain into the ledger lines shown against an order.
//!
//! * [`consolidation`] folds raw wallet events into one record per on-chain transaction.
//! * [`refunds`] works out the refund line, if any, for cancelled, declined and refunded orders.
//! * [`ledger_flow_api`] wraps both behind [`LedgerApi`], which owns the currency resolver and the wallets.
//!
//! # API usage
//!
//! ```rust,ignore
//! use market_engine::{CurrencyRegistries, CurrencyResolver, LedgerApi, Multiwallet, NetworkMode};
//! let resolver = CurrencyResolver::new(NetworkMode::Testnet, CurrencyRegistries::default());
//! let wallets = Multiwallet::new().with_wallet("TBTC", my_bitcoin_wallet);
//! let api = LedgerApi::new(resolver, wallets);
//! let (payments, refund) = api.build_transaction_records(&order, &contract, &wallet_events).await?;
//! ```
pub mod consolidation;
pub mod errors;
pub mod ledger_flow_api;
pub mod ledger_objects;
pub mod refunds;

#[cfg(test)]
mod mocks;
