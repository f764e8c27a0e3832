use chrono::{TimeZone, Utc};
use market_engine::notifications::{
    new_notification_id,
    BuyerReference,
    CaseReference,
    Notification,
    NotificationData,
    NotificationError,
    NotificationType,
    OrderReference,
    PeerReference,
};
use serde_json::{json, Value};

fn sample(t: NotificationType) -> NotificationData {
    use NotificationData as D;
    use NotificationType as T;
    let id = new_notification_id();
    let order = OrderReference::new(id.clone(), "order-1");
    let case = CaseReference::new(id.clone(), "case-1");
    let peer = PeerReference::new(id.clone(), "QmPeer");
    match t {
        T::Completion => D::Completion(order),
        T::DisputeAccepted => D::DisputeAccepted(order),
        T::DisputeAgedZeroDays => D::DisputeAgedZeroDays(case),
        T::DisputeAgedFifteenDays => D::DisputeAgedFifteenDays(case),
        T::DisputeAgedFortyDays => D::DisputeAgedFortyDays(case),
        T::DisputeAgedFortyFourDays => D::DisputeAgedFortyFourDays(case),
        T::DisputeAgedFortyFiveDays => D::DisputeAgedFortyFiveDays(case),
        T::DisputeClose => D::DisputeClose(order),
        T::DisputeOpen => D::DisputeOpen(order),
        T::DisputeUpdate => D::DisputeUpdate(order),
        T::Follow => D::Follow(peer),
        T::Fulfillment => D::Fulfillment(order),
        T::ModeratorAdd => D::ModeratorAdd(peer),
        T::ModeratorRemove => D::ModeratorRemove(peer),
        T::OrderCancel => D::OrderCancel(order),
        T::OrderConfirmation => D::OrderConfirmation(order),
        T::OrderDeclined => D::OrderDeclined(order),
        T::OrderNew => D::OrderNew(BuyerReference::new(id, "QmBuyer")),
        T::Payment => D::Payment(order),
        T::ProcessingError => D::ProcessingError(order),
        T::PurchaseAgedZeroDays => D::PurchaseAgedZeroDays(order),
        T::PurchaseAgedFifteenDays => D::PurchaseAgedFifteenDays(order),
        T::PurchaseAgedFortyOneDays => D::PurchaseAgedFortyOneDays(order),
        T::PurchaseAgedFortyFourDays => D::PurchaseAgedFortyFourDays(order),
        T::PurchaseAgedFortyFiveDays => D::PurchaseAgedFortyFiveDays(order),
        T::Refund => D::Refund(order),
        T::Unfollow => D::Unfollow(peer),
    }
}

#[test]
fn every_notification_survives_the_wire() {
    let timestamp = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap();
    for (i, t) in NotificationType::ALL.iter().enumerate() {
        let data = sample(*t);
        assert_eq!(data.notification_type(), *t);
        let notification = Notification::new(data, timestamp, i % 2 == 0);
        let json = notification.to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], t.as_str());
        let decoded = Notification::from_json(&json).unwrap();
        assert_eq!(decoded, notification, "{t} did not survive a round trip");
    }
}

#[test]
fn notifications_embed_in_other_documents() {
    let timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let list = vec![
        Notification::new(sample(NotificationType::Follow), timestamp, false),
        Notification::new(sample(NotificationType::PurchaseAgedFortyOneDays), timestamp, true),
    ];
    let doc = json!({ "notifications": list });
    assert_eq!(doc["notifications"][1]["type"], "purchaseAgedFortyOneDays");
    let back: Vec<Notification> = serde_json::from_value(doc["notifications"].clone()).unwrap();
    assert_eq!(back, list);
}

#[test]
fn unknown_discriminant_fails_to_decode() {
    let json = json!({
        "type": "disputeAgedNinetyDays",
        "notification": { "notificationId": "abc", "caseId": "case-1" },
        "timestamp": "2024-01-02T03:04:05Z",
        "read": false
    })
    .to_string();
    let err = Notification::from_json(&json).unwrap_err();
    assert!(matches!(err, NotificationError::UnknownNotificationType(ref t) if t == "disputeAgedNinetyDays"));
    assert!(serde_json::from_str::<Notification>(&json).is_err());
}

#[test]
fn catalogue_is_valid() {
    assert!(NotificationType::validate_catalogue().is_ok());
}
