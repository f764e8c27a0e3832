use std::{collections::HashSet, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::NotificationError;

//--------------------------------------   Subject references  ---------------------------------------------------------
/// The thing a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject<'a> {
    Order(&'a str),
    Case(&'a str),
    Peer(&'a str),
}

pub trait NotificationSubject {
    fn notification_id(&self) -> &str;
    fn subject(&self) -> Subject<'_>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderReference {
    pub notification_id: String,
    pub order_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CaseReference {
    pub notification_id: String,
    pub case_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PeerReference {
    pub notification_id: String,
    pub peer_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuyerReference {
    pub notification_id: String,
    pub buyer_id: String,
}

macro_rules! reference {
    ($name:ident, $field:ident, $subject:ident) => {
        impl $name {
            pub fn new<S: Into<String>, T: Into<String>>(notification_id: S, $field: T) -> Self {
                Self { notification_id: notification_id.into(), $field: $field.into() }
            }
        }

        impl NotificationSubject for $name {
            fn notification_id(&self) -> &str {
                &self.notification_id
            }

            fn subject(&self) -> Subject<'_> {
                Subject::$subject(&self.$field)
            }
        }
    };
}

reference!(OrderReference, order_id, Order);
reference!(CaseReference, case_id, Case);
reference!(PeerReference, peer_id, Peer);
reference!(BuyerReference, buyer_id, Peer);

//--------------------------------------  The notification set ---------------------------------------------------------
/// Declares the closed set of notifications. Each line binds a variant to its payload type and its wire discriminant,
/// so the encoder and decoder below are exhaustive by construction.
macro_rules! notifications {
    ($($variant:ident($payload:ty) => $tag:literal),+ $(,)?) => {
        /// The discriminant of a notification.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NotificationType {
            $($variant),+
        }

        impl NotificationType {
            pub const ALL: &'static [NotificationType] = &[$(NotificationType::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(NotificationType::$variant => $tag),+
                }
            }
        }

        impl FromStr for NotificationType {
            type Err = NotificationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok(NotificationType::$variant),)+
                    other => Err(NotificationError::UnknownNotificationType(other.to_string())),
                }
            }
        }

        /// The body of a notification: one variant per order-lifecycle or social event.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum NotificationData {
            $($variant($payload)),+
        }

        impl NotificationData {
            pub fn notification_type(&self) -> NotificationType {
                match self {
                    $(NotificationData::$variant(_) => NotificationType::$variant),+
                }
            }

            pub fn notification_id(&self) -> &str {
                match self {
                    $(NotificationData::$variant(n) => n.notification_id()),+
                }
            }

            pub fn subject(&self) -> Subject<'_> {
                match self {
                    $(NotificationData::$variant(n) => n.subject()),+
                }
            }

            pub(crate) fn to_payload(&self) -> Result<Value, serde_json::Error> {
                match self {
                    $(NotificationData::$variant(n) => serde_json::to_value(n)),+
                }
            }

            pub(crate) fn from_payload(
                notification_type: NotificationType,
                payload: Value,
            ) -> Result<Self, serde_json::Error> {
                match notification_type {
                    $(NotificationType::$variant => {
                        serde_json::from_value::<$payload>(payload).map(NotificationData::$variant)
                    }),+
                }
            }
        }
    };
}

notifications! {
    Completion(OrderReference) => "completion",
    DisputeAccepted(OrderReference) => "disputeAccepted",
    DisputeAgedZeroDays(CaseReference) => "disputeAgedZeroDays",
    DisputeAgedFifteenDays(CaseReference) => "disputeAgedFifteenDays",
    DisputeAgedFortyDays(CaseReference) => "disputeAgedFortyDays",
    DisputeAgedFortyFourDays(CaseReference) => "disputeAgedFortyFourDays",
    DisputeAgedFortyFiveDays(CaseReference) => "disputeAgedFortyFiveDays",
    DisputeClose(OrderReference) => "disputeClose",
    DisputeOpen(OrderReference) => "disputeOpen",
    DisputeUpdate(OrderReference) => "disputeUpdate",
    Follow(PeerReference) => "follow",
    Fulfillment(OrderReference) => "fulfillment",
    ModeratorAdd(PeerReference) => "moderatorAdd",
    ModeratorRemove(PeerReference) => "moderatorRemove",
    OrderCancel(OrderReference) => "cancel",
    OrderConfirmation(OrderReference) => "orderConfirmation",
    OrderDeclined(OrderReference) => "declined",
    OrderNew(BuyerReference) => "order",
    Payment(OrderReference) => "payment",
    ProcessingError(OrderReference) => "processingError",
    PurchaseAgedZeroDays(OrderReference) => "purchaseAgedZeroDays",
    PurchaseAgedFifteenDays(OrderReference) => "purchaseAgedFifteenDays",
    PurchaseAgedFortyOneDays(OrderReference) => "purchaseAgedFortyOneDays",
    PurchaseAgedFortyFourDays(OrderReference) => "purchaseAgedFortyFourDays",
    PurchaseAgedFortyFiveDays(OrderReference) => "purchaseAgedFortyFiveDays",
    Refund(OrderReference) => "refund",
    Unfollow(PeerReference) => "unfollow",
}

impl Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NotificationType {
    /// Checks that discriminants and variants are in one-to-one correspondence: every discriminant is unique and parses
    /// back to the variant that produced it.
    pub fn validate_catalogue() -> Result<(), NotificationError> {
        let mut seen = HashSet::with_capacity(Self::ALL.len());
        for t in Self::ALL {
            let tag = t.as_str();
            if !seen.insert(tag) || tag.parse::<NotificationType>().ok() != Some(*t) {
                return Err(NotificationError::DuplicateDiscriminant(tag.to_string()));
            }
        }
        Ok(())
    }
}
