use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::{BackendError, ByteSource, ObjectStore};

/// Object held by the in-memory store
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub content_type: String,
    pub bytes: Bytes,
}

/// In-memory [`ObjectStore`] for tests and host test harnesses
///
/// Mirrors the backend's observable behavior: upserts on upload, batch
/// removal, token-bearing signed links, and static public URLs. Can be
/// switched into a failing mode to exercise error propagation.
pub struct MemoryObjectStore {
    bucket: String,
    objects: Mutex<HashMap<String, StoredObject>>,
    signed_requests: Mutex<Vec<(String, u64)>>,
    failure: Option<String>,
}

impl MemoryObjectStore {
    /// Create an empty store for `bucket`
    pub fn new<S: Into<String>>(bucket: S) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Mutex::new(HashMap::new()),
            signed_requests: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// Make every operation fail with the given backend message
    pub fn failing<S: Into<String>, M: Into<String>>(bucket: S, message: M) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(bucket)
        }
    }

    fn check_failure(&self) -> Result<(), BackendError> {
        match &self.failure {
            Some(message) => Err(BackendError::new(message.clone())),
            None => Ok(()),
        }
    }

    /// Number of objects currently stored
    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }

    /// Whether an object exists at `key`
    pub async fn contains(&self, key: &str) -> bool {
        self.objects.lock().await.contains_key(key)
    }

    /// Fetch a stored object by key
    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().await.get(key).cloned()
    }

    /// Signed-URL requests seen so far, as `(key, expires_in)` pairs
    pub async fn signed_requests(&self) -> Vec<(String, u64)> {
        self.signed_requests.lock().await.clone()
    }

    async fn drain(body: ByteSource) -> Result<Bytes, BackendError> {
        match body {
            ByteSource::Buffer(bytes) => Ok(bytes),
            ByteSource::Stream(mut stream) => {
                let mut collected = Vec::new();
                while let Some(chunk) = stream.next().await {
                    let chunk = chunk.map_err(|e| BackendError::new(e.to_string()))?;
                    collected.extend_from_slice(&chunk);
                }
                Ok(Bytes::from(collected))
            }
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload_object(
        &self,
        key: &str,
        content_type: &str,
        body: ByteSource,
    ) -> Result<(), BackendError> {
        self.check_failure()?;
        let bytes = Self::drain(body).await?;
        // Upsert: re-uploading a key replaces the object
        self.objects.lock().await.insert(
            key.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        Ok(())
    }

    async fn remove_objects(&self, keys: &[String]) -> Result<(), BackendError> {
        self.check_failure()?;
        let mut objects = self.objects.lock().await;
        for key in keys {
            objects.remove(key);
        }
        Ok(())
    }

    async fn create_signed_url(&self, key: &str, expires_in: u64) -> Result<String, BackendError> {
        self.check_failure()?;
        self.signed_requests
            .lock()
            .await
            .push((key.to_string(), expires_in));
        Ok(format!(
            "memory://storage/v1/object/sign/{}/{}?token=signed-{}",
            self.bucket, key, expires_in
        ))
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "memory://storage/v1/object/public/{}/{}",
            self.bucket, key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_upserts() {
        let store = MemoryObjectStore::new("media");
        store
            .upload_object("abc.jpg", "image/jpeg", ByteSource::buffer(vec![1u8]))
            .await
            .unwrap();
        store
            .upload_object("abc.jpg", "image/jpeg", ByteSource::buffer(vec![2u8, 3]))
            .await
            .unwrap();

        assert_eq!(store.object_count().await, 1);
        assert_eq!(store.get("abc.jpg").await.unwrap().bytes.as_ref(), &[2, 3]);
    }

    #[tokio::test]
    async fn test_stream_payload_is_drained() {
        let store = MemoryObjectStore::new("media");
        let chunks: Vec<Result<Bytes, std::io::Error>> =
            vec![Ok(Bytes::from_static(b"he")), Ok(Bytes::from_static(b"llo"))];
        let stream = Box::pin(futures_util::stream::iter(chunks));
        store
            .upload_object("s.txt", "text/plain", ByteSource::stream(stream))
            .await
            .unwrap();

        assert_eq!(store.get("s.txt").await.unwrap().bytes.as_ref(), b"hello");
    }

    #[tokio::test]
    async fn test_remove_batch() {
        let store = MemoryObjectStore::new("media");
        store
            .upload_object("a", "text/plain", ByteSource::buffer(vec![1u8]))
            .await
            .unwrap();
        store
            .upload_object("b", "text/plain", ByteSource::buffer(vec![2u8]))
            .await
            .unwrap();

        store.remove_objects(&["a".to_string()]).await.unwrap();
        assert!(!store.contains("a").await);
        assert!(store.contains("b").await);
    }

    #[tokio::test]
    async fn test_failing_mode() {
        let store = MemoryObjectStore::failing("media", "service down");
        let err = store
            .upload_object("a", "text/plain", ByteSource::buffer(vec![1u8]))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "service down");
    }
}
