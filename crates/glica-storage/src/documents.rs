//! JSON document operations. Every object this crate touches is a JSON
//! document, so the S3 calls are specialized accordingly: values go in and
//! out typed, with the ETag carried for optimistic locking.

use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;

/// A loaded document plus the ETag it was read at.
pub struct Loaded<T> {
    pub value: T,
    pub etag: String,
}

/// Load and deserialize a JSON document.
pub async fn load<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<Loaded<T>, StorageError> {
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

    let etag = resp.e_tag().unwrap_or_default().to_string();
    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::GetObject(e.to_string()))?
        .into_bytes();

    let value: T = serde_json::from_slice(&body)?;
    Ok(Loaded { value, etag })
}

/// Serialize and write a JSON document. Returns the new ETag.
pub async fn save<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    let resp = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type("application/json")
        .body(ByteStream::from(body))
        .send()
        .await
        .map_err(|e| StorageError::PutObject(e.into_service_error().to_string()))?;

    Ok(resp.e_tag().unwrap_or_default().to_string())
}

/// Serialize and write a JSON document with an If-Match precondition.
///
/// Returns `StorageError::PreconditionFailed` when the object changed since
/// the ETag was read — the caller re-reads and retries the mutation.
pub async fn save_if_match<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
    expected_etag: &str,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    let resp = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type("application/json")
        .body(ByteStream::from(body))
        .if_match(expected_etag)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            // S3 answers 412 Precondition Failed when If-Match misses.
            if err.to_string().contains("PreconditionFailed") {
                StorageError::PreconditionFailed {
                    key: key.to_string(),
                }
            } else {
                StorageError::PutObject(err.to_string())
            }
        })?;

    Ok(resp.e_tag().unwrap_or_default().to_string())
}

/// Delete a document.
pub async fn delete(client: &Client, bucket: &str, key: &str) -> Result<(), StorageError> {
    client
        .delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| StorageError::DeleteObject(e.into_service_error().to_string()))?;

    Ok(())
}

/// List all keys under a prefix, following continuation tokens.
pub async fn list_keys(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<String>, StorageError> {
    let mut keys = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let mut req = client.list_objects_v2().bucket(bucket).prefix(prefix);
        if let Some(token) = &continuation_token {
            req = req.continuation_token(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;

        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                keys.push(key.to_string());
            }
        }

        if resp.is_truncated() == Some(true) {
            continuation_token = resp.next_continuation_token().map(|s| s.to_string());
        } else {
            break;
        }
    }

    Ok(keys)
}
