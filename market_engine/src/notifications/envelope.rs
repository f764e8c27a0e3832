use chrono::{DateTime, Utc};
use log::*;
use rand::RngCore;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::{errors::NotificationError, notification_data::NotificationData, NotificationType};

const NOTIFICATION_ID_BYTES: usize = 16;

/// Creates a fresh random notification id.
pub fn new_notification_id() -> String {
    let mut bytes = [0u8; NOTIFICATION_ID_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// A notification together with its delivery metadata.
///
/// On the wire it is a JSON object of the form
/// `{"type": "<discriminant>", "notification": {...}, "timestamp": "<RFC3339>", "read": false}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub data: NotificationData,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

#[derive(Serialize, Deserialize)]
struct RawNotification {
    #[serde(rename = "type")]
    notification_type: String,
    notification: Value,
    timestamp: DateTime<Utc>,
    read: bool,
}

impl Notification {
    pub fn new(data: NotificationData, timestamp: DateTime<Utc>, read: bool) -> Self {
        Self { data, timestamp, read }
    }

    /// A new, unread notification stamped with the current time.
    pub fn now(data: NotificationData) -> Self {
        Self::new(data, Utc::now(), false)
    }

    pub fn notification_type(&self) -> NotificationType {
        self.data.notification_type()
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }

    pub fn to_json(&self) -> Result<String, NotificationError> {
        let raw = RawNotification::try_from(self)?;
        Ok(serde_json::to_string(&raw)?)
    }

    pub fn from_json(s: &str) -> Result<Self, NotificationError> {
        let raw = serde_json::from_str::<RawNotification>(s)?;
        Notification::try_from(raw)
    }
}

impl TryFrom<&Notification> for RawNotification {
    type Error = NotificationError;

    fn try_from(n: &Notification) -> Result<Self, Self::Error> {
        Ok(Self {
            notification_type: n.notification_type().as_str().to_string(),
            notification: n.data.to_payload()?,
            timestamp: n.timestamp,
            read: n.read,
        })
    }
}

impl TryFrom<RawNotification> for Notification {
    type Error = NotificationError;

    fn try_from(raw: RawNotification) -> Result<Self, Self::Error> {
        let notification_type = raw.notification_type.parse::<NotificationType>().map_err(|e| {
            warn!("📬️ Received a notification with an unknown type: {}", raw.notification_type);
            e
        })?;
        let data = NotificationData::from_payload(notification_type, raw.notification)?;
        Ok(Self { data, timestamp: raw.timestamp, read: raw.read })
    }
}

impl Serialize for Notification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawNotification::try_from(self).map_err(ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Notification {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawNotification::deserialize(deserializer)?;
        Notification::try_from(raw).map_err(de::Error::custom)
    }
}
