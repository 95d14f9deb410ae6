use std::str::FromStr;

use colonnade_core::error::CoreError;
use colonnade_core::ids::MessageId;
use colonnade_core::models::message::Message;
use colonnade_core::models::sensor_metric::{CalendarSlot, SensorMetric};
use colonnade_core::predicate::{HourRange, Limit};
use colonnade_core::row::Row;
use uuid::Uuid;

fn ts(s: &str) -> jiff::Timestamp {
    s.parse().unwrap()
}

#[test]
fn message_ids_follow_creation_time() {
    let first = MessageId::at(ts("2025-11-13T08:00:00Z")).unwrap();
    let second = MessageId::at(ts("2025-11-13T08:00:00.001Z")).unwrap();
    let third = MessageId::at(ts("2025-11-13T09:30:00Z")).unwrap();
    assert!(first < second);
    assert!(second < third);
    assert_eq!(third.created_at().unwrap(), ts("2025-11-13T09:30:00Z"));
}

#[test]
fn freshly_minted_ids_are_version_7() {
    let id = MessageId::now();
    assert_eq!(id.as_uuid().get_version_num(), 7);
}

#[test]
fn random_uuid_is_not_a_message_id() {
    let err = MessageId::try_from(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidKey(_)));
    assert!(MessageId::from_str("11111111-1111-1111-1111-111111111111").is_err());
}

#[test]
fn message_id_round_trips_through_json_as_string() {
    let id = MessageId::at(ts("2025-01-02T03:04:05Z")).unwrap();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));
    let v4 = serde_json::to_string(&Uuid::new_v4()).unwrap();
    assert!(serde_json::from_str::<MessageId>(&v4).is_err());
}

#[test]
fn pre_epoch_instant_cannot_mint_id() {
    assert!(MessageId::at(ts("1969-12-31T23:59:59Z")).is_err());
}

fn message(created_at: jiff::Timestamp, id: MessageId) -> Message {
    Message {
        conversation_id: Uuid::new_v4(),
        message_id: id,
        sender_id: "user1".to_string(),
        sender_name: "Alice".to_string(),
        message_text: "hello".to_string(),
        created_at,
        is_read: false,
    }
}

#[test]
fn message_validation_ties_id_to_created_at() {
    let at = ts("2025-11-13T08:00:00Z");
    let ok = message(at, MessageId::at(at).unwrap());
    assert!(ok.validate().is_ok());

    let skewed = message(at, MessageId::at(ts("2025-11-13T08:00:01Z")).unwrap());
    assert!(matches!(skewed.validate(), Err(CoreError::InvalidKey(_))));
}

#[test]
fn message_serializes_with_camel_case_fields() {
    let at = ts("2025-11-13T08:00:00Z");
    let value = serde_json::to_value(message(at, MessageId::at(at).unwrap())).unwrap();
    for field in [
        "conversationId",
        "messageId",
        "senderId",
        "senderName",
        "messageText",
        "createdAt",
        "isRead",
    ] {
        assert!(value.get(field).is_some(), "missing {field}");
    }
}

#[test]
fn sensor_metric_derives_calendar_fields_in_utc() {
    let metric = SensorMetric::new(
        "TEMP-001",
        ts("2025-11-13T17:45:12Z"),
        "temperature",
        21.5,
        "C",
    );
    assert_eq!(
        metric.slot(),
        CalendarSlot { year: 2025, month: 11, day: 13, hour: 17 }
    );
    assert!(metric.validate().is_ok());
    assert_eq!(metric.partition_key().unwrap().to_string(), "TEMP-001/2025/11");
}

#[test]
fn sensor_metric_with_drifted_hour_fails_validation() {
    let mut metric = SensorMetric::new(
        "TEMP-001",
        ts("2025-11-13T17:45:12Z"),
        "temperature",
        21.5,
        "C",
    );
    metric.hour = 16;
    assert!(matches!(metric.validate(), Err(CoreError::InvalidArgument(_))));

    metric.hour = 24;
    assert!(matches!(metric.validate(), Err(CoreError::InvalidArgument(_))));
}

#[test]
fn sensor_metric_with_bad_sensor_id_fails_as_invalid_key() {
    let metric = SensorMetric::new("", ts("2025-11-13T17:45:12Z"), "temperature", 21.5, "C");
    assert!(matches!(metric.validate(), Err(CoreError::InvalidKey(_))));
}

#[test]
fn limit_must_be_positive() {
    assert_eq!(Limit::new(1).unwrap().get(), 1);
    assert_eq!(Limit::new(50).unwrap().get(), 50);
    assert!(matches!(Limit::new(0), Err(CoreError::InvalidArgument(_))));
    assert!(matches!(Limit::new(-3), Err(CoreError::InvalidArgument(_))));
}

#[test]
fn hour_range_bounds() {
    assert!(HourRange::new(0, 23).is_ok());
    assert!(HourRange::new(8, 8).is_ok());
    for (start, end) in [(-1, 5), (0, 24), (17, 8), (24, 24)] {
        assert!(
            matches!(HourRange::new(start, end), Err(CoreError::InvalidArgument(_))),
            "{start}..={end} should be rejected"
        );
    }
}
