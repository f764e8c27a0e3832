//! Folding raw wallet events into per-transaction ledger records.
use std::{
    collections::{hash_map::Entry, HashMap},
    str::FromStr,
};

use log::*;

use super::{
    errors::LedgerError,
    ledger_objects::{Order, TransactionRecord, WalletTransaction},
};
use crate::{
    currencies::{CurrencyDefinition, CurrencyResolver},
    helpers::{canonical_txid, TxHash},
    multiwallet::Multiwallet,
    traits::{WalletBackend, WalletError},
};

/// Resolves the order's payment currency and the wallet responsible for it.
pub(crate) fn order_currency_and_wallet<'w, W: WalletBackend>(
    resolver: &CurrencyResolver,
    wallets: &'w Multiwallet<W>,
    order: &Order,
) -> Result<(CurrencyDefinition, &'w W), LedgerError> {
    let code = order.currency_code().ok_or_else(|| LedgerError::MissingPayment(order.order_id.clone()))?;
    let currency = resolver.resolve(code)?;
    let wallet =
        wallets.wallet_for_currency_code(code).ok_or_else(|| LedgerError::WalletUnavailable(code.to_string()))?;
    Ok((currency, wallet))
}

pub(crate) async fn fetch_confirmations<W: WalletBackend>(wallet: &W, txid: &str) -> Result<(u32, u32), WalletError> {
    let hash = TxHash::from_str(canonical_txid(txid))?;
    wallet.get_confirmations(&hash).await
}

/// Groups the wallet events by transaction id and returns one ledger record per transaction.
///
/// The first event seen for a transaction seeds its record, including its timestamp and the confirmation count and
/// height reported by the wallet at that moment. Later events for the same transaction only add to the value.
///
/// Any wallet failure aborts the whole call. The order of the returned records is unspecified.
pub async fn consolidate<W: WalletBackend>(
    resolver: &CurrencyResolver,
    wallets: &Multiwallet<W>,
    order: &Order,
    transactions: &[WalletTransaction],
) -> Result<Vec<TransactionRecord>, LedgerError> {
    let (currency, wallet) = order_currency_and_wallet(resolver, wallets, order)?;
    let mut payments = HashMap::<&str, TransactionRecord>::with_capacity(transactions.len());
    for tx in transactions {
        match payments.entry(tx.txid.as_str()) {
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                record.value += &tx.value;
                trace!("🔄️ Added {} to transaction {}. Running total: {}", tx.value, tx.txid, record.value);
            },
            Entry::Vacant(entry) => {
                let (confirmations, height) = fetch_confirmations(wallet, &tx.txid).await.map_err(|e| {
                    warn!("🔄️ Could not fetch confirmations for {} on order {}. {e}", tx.txid, order.order_id);
                    e
                })?;
                entry.insert(TransactionRecord {
                    txid: tx.txid.clone(),
                    value: tx.value.clone(),
                    currency: currency.clone(),
                    timestamp: tx.timestamp,
                    confirmations,
                    height,
                });
            },
        }
    }
    debug!(
        "🔄️ Consolidated {} wallet events into {} records for order {}",
        transactions.len(),
        payments.len(),
        order.order_id
    );
    Ok(payments.into_values().collect())
}
