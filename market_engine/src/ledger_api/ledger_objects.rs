use std::fmt::Display;

use chrono::{DateTime, Utc};
use mkt_common::BigValue;
use serde::{Deserialize, Serialize};

use crate::currencies::CurrencyDefinition;

//--------------------------------------      OrderState       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    Pending,
    AwaitingPayment,
    AwaitingFulfillment,
    PartiallyFulfilled,
    Fulfilled,
    Completed,
    Canceled,
    Declined,
    Refunded,
    Disputed,
    Decided,
    Resolved,
    PaymentFinalized,
    ProcessingError,
}

impl OrderState {
    /// States in which funds may have flowed back to the buyer.
    pub fn may_have_refund(&self) -> bool {
        matches!(self, OrderState::Refunded | OrderState::Declined | OrderState::Canceled)
    }
}

impl Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

//--------------------------------------     PaymentMethod     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Paid straight to the vendor.
    Direct,
    /// Paid into a multisig escrow address, released with the help of a moderator.
    Moderated,
}

//--------------------------------------        Order          ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayment {
    pub method: PaymentMethod,
    pub currency_code: String,
}

/// The read-only view of an order that the ledger needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub state: OrderState,
    pub payment: Option<OrderPayment>,
}

impl Order {
    pub fn new(order_id: &str, state: OrderState, method: PaymentMethod, currency_code: &str) -> Self {
        let payment = Some(OrderPayment { method, currency_code: currency_code.to_string() });
        Self { order_id: order_id.to_string(), state, payment }
    }

    pub fn currency_code(&self) -> Option<&str> {
        self.payment.as_ref().map(|p| p.currency_code.as_str())
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment.as_ref().map(|p| p.method)
    }
}

//--------------------------------------       Contract        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundTransaction {
    pub txid: String,
    pub value: BigValue,
    pub currency: CurrencyDefinition,
}

/// The vendor's refund, as recorded in the contract. Only direct orders carry one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRefund {
    pub refund_transaction: Option<RefundTransaction>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub refund: Option<ContractRefund>,
}

impl Contract {
    pub fn with_refund(transaction: RefundTransaction, timestamp: DateTime<Utc>) -> Self {
        let refund = ContractRefund { refund_transaction: Some(transaction), timestamp: Some(timestamp) };
        Self { refund: Some(refund) }
    }
}

//--------------------------------------   WalletTransaction   ---------------------------------------------------------
/// A raw transaction event as reported by a wallet. A single on-chain transaction paying several escrow outputs is
/// reported as several events sharing the same `txid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub txid: String,
    pub value: BigValue,
    pub address: String,
    pub timestamp: DateTime<Utc>,
}

impl WalletTransaction {
    pub fn new(txid: &str, value: BigValue, timestamp: DateTime<Utc>) -> Self {
        Self { txid: txid.to_string(), value, address: String::default(), timestamp }
    }
}

//--------------------------------------   TransactionRecord   ---------------------------------------------------------
/// A single order-scoped ledger line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub txid: String,
    #[serde(rename = "bigValue")]
    pub value: BigValue,
    pub currency: CurrencyDefinition,
    pub timestamp: DateTime<Utc>,
    pub confirmations: u32,
    pub height: u32,
}

pub type RefundRecord = TransactionRecord;

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use chrono::TimeZone;

    use super::*;
    use crate::currencies::CurrencyScope;

    #[test]
    fn refundable_states() {
        use OrderState::*;
        let refundable = [Refunded, Declined, Canceled];
        for state in [
            Pending,
            AwaitingPayment,
            AwaitingFulfillment,
            PartiallyFulfilled,
            Fulfilled,
            Completed,
            Canceled,
            Declined,
            Refunded,
            Disputed,
            Decided,
            Resolved,
            PaymentFinalized,
            ProcessingError,
        ] {
            assert_eq!(state.may_have_refund(), refundable.contains(&state), "{state}");
        }
    }

    #[test]
    fn record_wire_format() {
        let record = TransactionRecord {
            txid: "abc".into(),
            value: BigValue::from_str("18446744073709551616").unwrap(),
            currency: CurrencyDefinition::new("BTC", "Bitcoin", CurrencyScope::MainnetCrypto, 8),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            confirmations: 6,
            height: 830_000,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["bigValue"], "18446744073709551616");
        assert_eq!(json["confirmations"], 6);
        let back: TransactionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
