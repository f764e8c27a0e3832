use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//--------------------------------------     MessageType       ---------------------------------------------------------
/// The kind of peer-to-peer protocol message. The integer codes are part of the wire and storage format and must never
/// be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Ping,
    Chat,
    Follow,
    Unfollow,
    ModeratorAdd,
    ModeratorRemove,
    Order,
    OrderReject,
    OrderCancel,
    OrderConfirmation,
    OrderFulfillment,
    OrderCompletion,
    DisputeOpen,
    DisputeUpdate,
    DisputeClose,
    Refund,
    OfflineAck,
    OfflineRelay,
    Store,
    Block,
    VendorFinalizedPayment,
    OrderPayment,
    Error,
}

#[derive(Debug, Clone, Error)]
#[error("Invalid message type code: {0}")]
pub struct MessageTypeConversionError(pub i32);

impl MessageType {
    pub fn code(&self) -> i32 {
        match self {
            MessageType::Ping => 0,
            MessageType::Chat => 1,
            MessageType::Follow => 2,
            MessageType::Unfollow => 3,
            MessageType::ModeratorAdd => 4,
            MessageType::ModeratorRemove => 5,
            MessageType::Order => 6,
            MessageType::OrderReject => 7,
            MessageType::OrderCancel => 8,
            MessageType::OrderConfirmation => 9,
            MessageType::OrderFulfillment => 10,
            MessageType::OrderCompletion => 11,
            MessageType::DisputeOpen => 12,
            MessageType::DisputeUpdate => 13,
            MessageType::DisputeClose => 14,
            MessageType::Refund => 15,
            MessageType::OfflineAck => 16,
            MessageType::OfflineRelay => 17,
            MessageType::Store => 18,
            MessageType::Block => 19,
            MessageType::VendorFinalizedPayment => 20,
            MessageType::OrderPayment => 21,
            MessageType::Error => 500,
        }
    }
}

impl TryFrom<i32> for MessageType {
    type Error = MessageTypeConversionError;

    fn try_from(value: i32) -> Result<Self, MessageTypeConversionError> {
        use MessageType::*;
        let t = match value {
            0 => Ping,
            1 => Chat,
            2 => Follow,
            3 => Unfollow,
            4 => ModeratorAdd,
            5 => ModeratorRemove,
            6 => Order,
            7 => OrderReject,
            8 => OrderCancel,
            9 => OrderConfirmation,
            10 => OrderFulfillment,
            11 => OrderCompletion,
            12 => DisputeOpen,
            13 => DisputeUpdate,
            14 => DisputeClose,
            15 => Refund,
            16 => OfflineAck,
            17 => OfflineRelay,
            18 => Store,
            19 => Block,
            20 => VendorFinalizedPayment,
            21 => OrderPayment,
            500 => Error,
            v => return Err(MessageTypeConversionError(v)),
        };
        Ok(t)
    }
}

impl Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

//--------------------------------------     PeerMessage       ---------------------------------------------------------
/// The body of a protocol message exchanged between peers.
///
/// The payload itself is opaque to the engine; it is carried as JSON and handed back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerMessage {
    #[serde(rename = "messageType", default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
}

impl PeerMessage {
    pub fn new(message_type: MessageType, payload: serde_json::Value) -> Self {
        Self { message_type: Some(message_type), payload }
    }

    pub fn is_empty(&self) -> bool {
        self.message_type.is_none() && self.payload.is_null()
    }
}

//--------------------------------------     NewMessage        ---------------------------------------------------------
/// A message that is about to be written to the message store, either because it was received from a peer or
/// because we are (re)sending it.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub message_id: String,
    pub order_id: String,
    pub message_type: MessageType,
    pub message: PeerMessage,
    pub peer_id: String,
    /// A non-empty value marks the message as a retry candidate.
    pub error: String,
    /// Unix timestamp (seconds) of when the message was received.
    pub received_at: i64,
    pub pubkey: Vec<u8>,
}

impl NewMessage {
    pub fn new(message_id: &str, order_id: &str, message_type: MessageType, peer_id: &str) -> Self {
        Self {
            message_id: message_id.to_string(),
            order_id: order_id.to_string(),
            message_type,
            message: PeerMessage::default(),
            peer_id: peer_id.to_string(),
            error: String::default(),
            received_at: 0,
            pubkey: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: PeerMessage) -> Self {
        self.message = message;
        self
    }

    pub fn with_error<S: Into<String>>(mut self, error: S) -> Self {
        self.error = error.into();
        self
    }

    pub fn with_received_at(mut self, received_at: i64) -> Self {
        self.received_at = received_at;
        self
    }

    pub fn with_pubkey(mut self, pubkey: Vec<u8>) -> Self {
        self.pubkey = pubkey;
        self
    }
}

//--------------------------------------    StoredMessage      ---------------------------------------------------------
/// The result of a point lookup on the message store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMessage {
    pub message: PeerMessage,
    pub peer_id: String,
    pub error: String,
}

//--------------------------------------    OrderMessage       ---------------------------------------------------------
/// A full message row, payload left serialized. Used to rebuild the retry queue after a restart.
///
/// The message type is kept as its raw code, since rows written by a newer node may carry codes this node does not
/// know. Use [`OrderMessage::known_type`] to interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMessage {
    pub message_id: String,
    pub order_id: String,
    pub message_type: i32,
    pub message: Vec<u8>,
    pub peer_id: String,
    pub error: String,
    pub pubkey: Vec<u8>,
}

impl OrderMessage {
    pub fn known_type(&self) -> Result<MessageType, MessageTypeConversionError> {
        MessageType::try_from(self.message_type)
    }
}
