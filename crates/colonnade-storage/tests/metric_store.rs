mod common;

use std::sync::Arc;

use colonnade_core::models::sensor_metric::SensorMetric;
use colonnade_storage::error::QueryError;
use colonnade_storage::memory::MemoryStore;
use colonnade_storage::metrics::MetricStore;

use common::{reading, recording, ts};

async fn seeded() -> MetricStore {
    let store = MetricStore::new(Arc::new(MemoryStore::new()), 3);
    for (sensor, at, value) in [
        ("TEMP-001", "2025-11-13T08:15:00Z", 21.5),
        ("TEMP-001", "2025-11-13T17:40:00Z", 24.0),
        ("TEMP-001", "2025-11-13T17:05:00Z", 23.5),
        ("TEMP-001", "2025-11-13T20:00:00Z", 22.0),
        ("TEMP-001", "2025-11-12T08:30:00Z", 20.0),
        ("TEMP-001", "2025-11-01T00:00:00Z", 18.0),
        ("TEMP-001", "2025-10-31T23:59:59Z", 17.0),
        ("CPU-001", "2025-11-13T08:20:00Z", 55.0),
    ] {
        store.append_metric(&reading(sensor, at, value)).await.unwrap();
    }
    store
}

fn values(rows: &[SensorMetric]) -> Vec<f64> {
    rows.iter().map(|m| m.metric_value).collect()
}

#[tokio::test]
async fn hour_range_is_inclusive_and_newest_first() {
    let store = seeded().await;
    let rows = store
        .metrics_for_hour_range("TEMP-001", 2025, 11, 13, 8, 17)
        .await
        .unwrap();
    assert_eq!(values(&rows), vec![24.0, 23.5, 21.5]);
    assert_eq!(rows[0].hour, 17);
    assert_eq!(rows[2].hour, 8);
}

#[tokio::test]
async fn single_hour_window() {
    let store = seeded().await;
    let rows = store
        .metrics_for_hour_range("TEMP-001", 2025, 11, 13, 17, 17)
        .await
        .unwrap();
    assert_eq!(values(&rows), vec![24.0, 23.5]);
}

#[tokio::test]
async fn month_partition_holds_only_its_month() {
    let store = seeded().await;
    let rows = store.metrics_for_month("TEMP-001", 2025, 11).await.unwrap();
    assert_eq!(values(&rows), vec![22.0, 24.0, 23.5, 21.5, 20.0, 18.0]);
    assert!(rows.iter().all(|m| m.sensor_id == "TEMP-001" && m.month == 11));

    let october = store.metrics_for_month("TEMP-001", 2025, 10).await.unwrap();
    assert_eq!(values(&october), vec![17.0]);
}

#[tokio::test]
async fn empty_month_is_empty_not_an_error() {
    let store = seeded().await;
    assert!(store.metrics_for_month("TEMP-001", 2024, 2).await.unwrap().is_empty());
    assert!(store.metrics_for_month("HUMID-009", 2025, 11).await.unwrap().is_empty());
}

#[tokio::test]
async fn day_query_respects_limit() {
    let store = seeded().await;
    let all = store
        .metrics_for_day("TEMP-001", 2025, 11, 13, 100)
        .await
        .unwrap();
    assert_eq!(values(&all), vec![22.0, 24.0, 23.5, 21.5]);

    let two = store
        .metrics_for_day("TEMP-001", 2025, 11, 13, 2)
        .await
        .unwrap();
    assert_eq!(values(&two), vec![22.0, 24.0]);

    let none = store
        .metrics_for_day("TEMP-001", 2025, 11, 14, 10)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn latest_metrics_crosses_days() {
    let store = seeded().await;
    let rows = store.latest_metrics("TEMP-001", 2025, 11, 5).await.unwrap();
    assert_eq!(values(&rows), vec![22.0, 24.0, 23.5, 21.5, 20.0]);
}

#[tokio::test]
async fn current_month_follows_the_clock() {
    let store = seeded().await;
    let rows = store
        .metrics_for_current_month("CPU-001", ts("2025-11-30T23:00:00Z"))
        .await
        .unwrap();
    assert_eq!(values(&rows), vec![55.0]);

    let rows = store
        .metrics_for_current_month("CPU-001", ts("2025-12-01T00:00:00Z"))
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn bad_arguments_never_reach_the_engine() {
    let engine = recording();
    let store = MetricStore::new(engine.clone(), 10);

    let err = store
        .metrics_for_hour_range("TEMP-001", 2025, 11, 13, 17, 8)
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidArgument(_)));

    for (start, end) in [(-1, 5), (0, 24)] {
        let err = store
            .metrics_for_hour_range("TEMP-001", 2025, 11, 13, start, end)
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidArgument(_)), "{start}..{end}");
    }

    for day in [0, 32] {
        let err = store
            .metrics_for_day("TEMP-001", 2025, 11, day, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidArgument(_)), "day {day}");
    }

    let err = store
        .latest_metrics("TEMP-001", 2025, 11, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidArgument(_)));

    assert_eq!(engine.scan_count(), 0);
}

#[tokio::test]
async fn bad_partition_keys_are_invalid_key() {
    let store = MetricStore::new(recording(), 10);
    for (sensor, month) in [("", 11), ("TEMP 001", 11), ("TEMP-001", 0), ("TEMP-001", 13)] {
        let err = store.metrics_for_month(sensor, 2025, month).await.unwrap_err();
        assert!(matches!(err, QueryError::InvalidKey(_)), "{sensor:?} {month}");
    }
}

#[tokio::test]
async fn reading_with_mismatched_calendar_is_rejected() {
    let store = seeded().await;
    let mut metric = reading("TEMP-001", "2025-11-13T08:15:00Z", 30.0);
    metric.hour = 9;
    let err = store.append_metric(&metric).await.unwrap_err();
    assert!(matches!(err, QueryError::InvalidArgument(_)));
}
