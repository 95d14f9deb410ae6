use colonnade_storage::config::{Backend, DEFAULT_PAGE_SIZE, S3Config, StoreConfig, build_store};
use colonnade_storage::error::StorageError;

#[test]
fn empty_object_is_in_memory_with_default_page_size() {
    let config: StoreConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, StoreConfig::default());
    assert_eq!(config.backend, Backend::InMemory);
    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    config.validate().unwrap();
}

#[test]
fn s3_backend_is_tagged() {
    let config: StoreConfig = serde_json::from_str(
        r#"{"backend": {"type": "S3", "bucket": "metrics", "prefix": "prod/"}, "page_size": 200}"#,
    )
    .unwrap();
    assert_eq!(
        config.backend,
        Backend::S3(S3Config {
            bucket: "metrics".to_string(),
            region: None,
            prefix: "prod/".to_string(),
        })
    );
    assert_eq!(config.page_size, 200);
    config.validate().unwrap();
}

#[test]
fn invalid_configs_are_rejected() {
    let zero_page = StoreConfig {
        page_size: 0,
        ..StoreConfig::default()
    };
    let empty_bucket = StoreConfig {
        backend: Backend::S3(S3Config {
            bucket: String::new(),
            region: None,
            prefix: String::new(),
        }),
        ..StoreConfig::default()
    };
    let bad_prefix = StoreConfig {
        backend: Backend::S3(S3Config {
            bucket: "metrics".to_string(),
            region: Some("us-east-1".to_string()),
            prefix: "prod".to_string(),
        }),
        ..StoreConfig::default()
    };
    for config in [zero_page, empty_bucket, bad_prefix] {
        assert!(matches!(config.validate(), Err(StorageError::Config(_))));
    }
}

#[tokio::test]
async fn build_store_refuses_invalid_config() {
    let config = StoreConfig {
        page_size: 0,
        ..StoreConfig::default()
    };
    assert!(matches!(build_store(&config).await, Err(StorageError::Config(_))));
}

#[tokio::test]
async fn build_store_in_memory() {
    let store = build_store(&StoreConfig::default()).await.unwrap();
    let row = store.get("conversations", "p", "static").await.unwrap();
    assert!(row.is_none());
}
