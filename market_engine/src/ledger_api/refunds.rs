//! Deriving the refund line for a cancelled, declined or refunded order.
use log::*;

use super::{
    consolidation::{fetch_confirmations, order_currency_and_wallet},
    errors::LedgerError,
    ledger_objects::{Contract, Order, OrderState, PaymentMethod, RefundRecord, TransactionRecord},
};
use crate::{currencies::CurrencyResolver, multiwallet::Multiwallet, traits::WalletBackend};

/// Works out whether, and how, the buyer was refunded.
///
/// Only orders in the `Refunded`, `Declined` or `Canceled` state, with payment details, can have a refund. For any
/// other order this returns `None`.
///
/// * Escrowed (moderated) orders, and any declined or cancelled order, are refunded out of the payment address. The
///   refund shows up in `records` as an outgoing (negative) transaction. The first negative record is returned with
///   its sign flipped. The pick is made in slice order, and `consolidate` makes no promise about that order.
/// * Direct orders that were refunded by the vendor carry the refund details in the contract. The record is built
///   from those details, and the wallet is asked for the confirmation count. If that query fails, the refund is still
///   returned, with zero confirmations and height.
pub async fn resolve_refund<W: WalletBackend>(
    resolver: &CurrencyResolver,
    wallets: &Multiwallet<W>,
    order: &Order,
    contract: &Contract,
    records: &[TransactionRecord],
) -> Result<Option<RefundRecord>, LedgerError> {
    if !order.state.may_have_refund() {
        trace!("🔄️ Order {} is {}. No refund to resolve", order.order_id, order.state);
        return Ok(None);
    }
    let Some(method) = order.payment_method() else {
        debug!("🔄️ Order {} has no payment details. No refund to resolve", order.order_id);
        return Ok(None);
    };
    let from_payment_address =
        method == PaymentMethod::Moderated || matches!(order.state, OrderState::Declined | OrderState::Canceled);
    if from_payment_address {
        Ok(outgoing_refund(order, records))
    } else {
        direct_refund(resolver, wallets, order, contract).await
    }
}

fn outgoing_refund(order: &Order, records: &[TransactionRecord]) -> Option<RefundRecord> {
    let record = records.iter().find(|r| r.value.is_negative())?;
    debug!("🔄️ Refund for order {} found in outgoing transaction {}", order.order_id, record.txid);
    Some(RefundRecord { value: -&record.value, ..record.clone() })
}

async fn direct_refund<W: WalletBackend>(
    resolver: &CurrencyResolver,
    wallets: &Multiwallet<W>,
    order: &Order,
    contract: &Contract,
) -> Result<Option<RefundRecord>, LedgerError> {
    let Some(refund) = contract.refund.as_ref() else {
        trace!("🔄️ Direct order {} has no refund in its contract", order.order_id);
        return Ok(None);
    };
    let (Some(transaction), Some(timestamp)) = (refund.refund_transaction.as_ref(), refund.timestamp) else {
        debug!("🔄️ The refund for direct order {} is incomplete. Ignoring it", order.order_id);
        return Ok(None);
    };
    let (_, wallet) = order_currency_and_wallet(resolver, wallets, order)?;
    let (confirmations, height) = match fetch_confirmations(wallet, &transaction.txid).await {
        Ok(v) => v,
        Err(e) => {
            warn!(
                "🔄️ Could not fetch confirmations for refund {} on order {}. The refund will be reported as \
                 unconfirmed. {e}",
                transaction.txid, order.order_id
            );
            (0, 0)
        },
    };
    Ok(Some(RefundRecord {
        txid: transaction.txid.clone(),
        value: transaction.value.clone(),
        currency: transaction.currency.clone(),
        timestamp,
        confirmations,
        height,
    }))
}
