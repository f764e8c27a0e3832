//! User-facing notifications and their JSON envelope.
//!
//! The set of notifications is closed. [`NotificationData`] has one variant per event, and each variant maps to
//! exactly one wire discriminant (see [`NotificationType`]). Adding a variant without a discriminant does not compile.
mod envelope;
mod errors;
mod notification_data;

pub use envelope::{new_notification_id, Notification};
pub use errors::NotificationError;
pub use notification_data::{
    BuyerReference,
    CaseReference,
    NotificationData,
    NotificationSubject,
    NotificationType,
    OrderReference,
    PeerReference,
    Subject,
};
