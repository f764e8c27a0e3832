//! # Backend interfaces
//!
//! This module defines the contracts the engine expects from its external collaborators.
//!
//! * [`WalletBackend`] is the per-currency wallet capability used to fetch confirmation counts for on-chain
//!   transactions. Wallets are registered in a [`crate::Multiwallet`], keyed by currency code.
//! * [`MessageStore`] defines durable, idempotent storage for peer protocol messages. [`crate::SqliteDatabase`] is
//!   the provided implementation.
mod message_store;
mod wallet_backend;

pub use message_store::{MessageStore, MessageStoreError};
pub use wallet_backend::{WalletBackend, WalletError};
