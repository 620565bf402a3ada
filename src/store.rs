use async_trait::async_trait;

use crate::{BackendError, ByteSource};

/// Backend object-storage operations - the seam between adapter logic and
/// transport
///
/// Implementations return the backend's own error message through
/// [`BackendError`]; the adapter wraps it into an operation-specific error.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an object at `key`, overwriting any existing object there
    ///
    /// The payload is sent with `content_type` and a short cache-control
    /// directive; buffer and stream payloads are accepted uniformly.
    async fn upload_object(
        &self,
        key: &str,
        content_type: &str,
        body: ByteSource,
    ) -> Result<(), BackendError>;

    /// Remove a batch of objects by key
    async fn remove_objects(&self, keys: &[String]) -> Result<(), BackendError>;

    /// Request a time-limited signed link for `key`
    async fn create_signed_url(&self, key: &str, expires_in: u64) -> Result<String, BackendError>;

    /// Compose the permanent public URL for `key`
    ///
    /// Pure string composition; no network round trip.
    fn public_url(&self, key: &str) -> String;
}
