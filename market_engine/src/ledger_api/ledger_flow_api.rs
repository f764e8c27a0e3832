use std::fmt::Debug;

use log::*;

use super::{
    consolidation,
    errors::LedgerError,
    ledger_objects::{Contract, Order, RefundRecord, TransactionRecord, WalletTransaction},
    refunds,
};
use crate::{currencies::CurrencyResolver, multiwallet::Multiwallet, traits::WalletBackend};

/// `LedgerApi` builds the payment and refund lines for an order from the events its wallets report.
///
/// It holds no state besides the resolver and wallets, so a single instance can serve concurrent requests.
pub struct LedgerApi<W> {
    resolver: CurrencyResolver,
    wallets: Multiwallet<W>,
}

impl<W> Debug for LedgerApi<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LedgerApi ({}, {:?})", self.resolver.network(), self.wallets)
    }
}

impl<W> LedgerApi<W> {
    pub fn new(resolver: CurrencyResolver, wallets: Multiwallet<W>) -> Self {
        Self { resolver, wallets }
    }

    pub fn resolver(&self) -> &CurrencyResolver {
        &self.resolver
    }

    pub fn wallets(&self) -> &Multiwallet<W> {
        &self.wallets
    }
}

impl<W> LedgerApi<W>
where W: WalletBackend
{
    /// See [`consolidation::consolidate`].
    pub async fn consolidate(
        &self,
        order: &Order,
        transactions: &[WalletTransaction],
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        consolidation::consolidate(&self.resolver, &self.wallets, order, transactions).await
    }

    /// See [`refunds::resolve_refund`].
    pub async fn resolve_refund(
        &self,
        order: &Order,
        contract: &Contract,
        records: &[TransactionRecord],
    ) -> Result<Option<RefundRecord>, LedgerError> {
        refunds::resolve_refund(&self.resolver, &self.wallets, order, contract, records).await
    }

    /// Builds the ledger lines for the order view: one record per on-chain transaction, plus the refund, if there is
    /// one.
    pub async fn build_transaction_records(
        &self,
        order: &Order,
        contract: &Contract,
        transactions: &[WalletTransaction],
    ) -> Result<(Vec<TransactionRecord>, Option<RefundRecord>), LedgerError> {
        let records = self.consolidate(order, transactions).await?;
        let refund = self.resolve_refund(order, contract, &records).await?;
        trace!(
            "🔄️ Order {} has {} transaction records and {} refund",
            order.order_id,
            records.len(),
            if refund.is_some() { "a" } else { "no" }
        );
        Ok((records, refund))
    }
}
