use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Unknown notification type: {0}")]
    UnknownNotificationType(String),
    #[error("Malformed notification: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Notification discriminant {0} is not uniquely mapped to a single variant")]
    DuplicateDiscriminant(String),
}
