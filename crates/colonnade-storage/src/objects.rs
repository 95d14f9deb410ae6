use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;

use crate::error::StorageError;

/// Get an object body from S3.
pub async fn get_object(client: &Client, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                StorageError::NotFound {
                    key: key.to_string(),
                }
            } else {
                StorageError::GetObject(err.to_string())
            }
        })?;

    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::GetObject(e.to_string()))?
        .into_bytes()
        .to_vec();

    Ok(body)
}

/// Put an object to S3.
pub async fn put_object(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    content_type: Option<&str>,
) -> Result<(), StorageError> {
    let mut req = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body));

    if let Some(ct) = content_type {
        req = req.content_type(ct);
    }

    req.send()
        .await
        .map_err(|e| StorageError::PutObject(e.into_service_error().to_string()))?;

    Ok(())
}

/// One page of a key listing.
pub struct KeyPage {
    pub keys: Vec<String>,
    pub truncated: bool,
}

/// List up to `max_keys` keys under a prefix, strictly after `start_after`,
/// in ascending UTF-8 byte order.
pub async fn list_keys_page(
    client: &Client,
    bucket: &str,
    prefix: &str,
    start_after: Option<&str>,
    max_keys: usize,
) -> Result<KeyPage, StorageError> {
    let max_keys = i32::try_from(max_keys).unwrap_or(i32::MAX);
    let resp = client
        .list_objects_v2()
        .bucket(bucket)
        .prefix(prefix)
        .set_start_after(start_after.map(str::to_string))
        .max_keys(max_keys)
        .send()
        .await
        .map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;

    let keys = resp
        .contents()
        .iter()
        .filter_map(|obj| obj.key().map(str::to_string))
        .collect();

    Ok(KeyPage {
        keys,
        truncated: resp.is_truncated() == Some(true),
    })
}
