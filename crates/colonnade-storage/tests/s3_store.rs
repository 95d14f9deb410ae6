//! Integration tests against a real S3 bucket.
//!
//! These tests need valid AWS credentials in the environment and a bucket
//! named by `COLONNADE_TEST_BUCKET`. Every run writes under a fresh prefix.
//!
//! Run with: `cargo test -p colonnade-storage --test s3_store -- --ignored`

mod common;

use std::sync::Arc;

use colonnade_storage::client::build_client;
use colonnade_storage::conversations::ConversationStore;
use colonnade_storage::metrics::MetricStore;
use colonnade_storage::s3::S3Store;
use uuid::Uuid;

use common::{message, reading};

async fn build_store() -> Arc<S3Store> {
    let bucket = std::env::var("COLONNADE_TEST_BUCKET").expect("COLONNADE_TEST_BUCKET not set");
    let client = build_client(Some("us-east-1")).await;
    let prefix = format!("colonnade-test/{}/", Uuid::new_v4());
    println!("writing under s3://{bucket}/{prefix}");
    Arc::new(S3Store::new(client, bucket, prefix))
}

#[tokio::test]
#[ignore]
async fn s3_latest_messages_page_through_listing() {
    let store = ConversationStore::new(build_store().await, 2);
    let conversation = Uuid::new_v4();
    for s in 1..=5 {
        let at = format!("2025-11-13T10:00:0{s}Z");
        store
            .append_message(&message(conversation, &at, &format!("m{s}")))
            .await
            .unwrap();
    }

    let latest = store.latest_messages(conversation, 3).await.unwrap();
    let texts: Vec<_> = latest.iter().map(|m| m.message_text.as_str()).collect();
    assert_eq!(texts, vec!["m5", "m4", "m3"]);

    let all = store.list_messages(conversation).await.unwrap();
    assert_eq!(all.len(), 5);
}

#[tokio::test]
#[ignore]
async fn s3_hour_range_stops_at_range_end() {
    let store = MetricStore::new(build_store().await, 2);
    for (at, value) in [
        ("2025-11-13T07:59:00Z", 1.0),
        ("2025-11-13T08:00:00Z", 2.0),
        ("2025-11-13T12:30:00Z", 3.0),
        ("2025-11-13T17:59:59Z", 4.0),
        ("2025-11-13T18:00:00Z", 5.0),
    ] {
        store.append_metric(&reading("TEMP-001", at, value)).await.unwrap();
    }

    let rows = store
        .metrics_for_hour_range("TEMP-001", 2025, 11, 13, 8, 17)
        .await
        .unwrap();
    let values: Vec<f64> = rows.iter().map(|m| m.metric_value).collect();
    assert_eq!(values, vec![4.0, 3.0, 2.0]);

    assert!(store.metrics_for_month("TEMP-001", 2025, 12).await.unwrap().is_empty());
}
