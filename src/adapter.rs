use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::format::{human_readable_bytes, kilobytes_to_bytes, object_key};
use crate::{
    ByteSource, MediaFile, ObjectStore, ProviderConfig, ProviderError, ProviderResult, SignedUrl,
    SupabaseStore, UploadedUrl,
};

/// The provider contract the host media pipeline depends on
///
/// One capability interface with six operations; the host never branches on
/// bucket visibility itself.
#[async_trait]
pub trait UploadProvider: Send + Sync {
    /// Upload a file payload and return its new externally-visible URL value
    async fn upload(&self, file: &MediaFile, body: ByteSource) -> ProviderResult<UploadedUrl>;

    /// Alias for [`upload`](UploadProvider::upload); the backend accepts
    /// buffer and stream payloads uniformly
    async fn upload_stream(
        &self,
        file: &MediaFile,
        body: ByteSource,
    ) -> ProviderResult<UploadedUrl>;

    /// Remove the file's object from the bucket
    async fn delete(&self, file: &MediaFile) -> ProviderResult<()>;

    /// Reject the file when it exceeds `size_limit_bytes`. Pure comparison,
    /// no I/O.
    fn check_file_size(&self, file: &MediaFile, size_limit_bytes: f64) -> ProviderResult<()>;

    /// Whether the configured bucket is access-controlled
    fn is_private(&self) -> bool;

    /// Resolve a readable URL for the file: the stored URL unchanged for
    /// public buckets, a fresh time-limited link for private ones
    async fn signed_url(&self, file: &MediaFile) -> ProviderResult<SignedUrl>;
}

/// Upload provider facade over an [`ObjectStore`] backend
///
/// Holds the validated configuration flags and a shared store handle; safe
/// for concurrent use. Every operation is a single-shot call with no
/// internal retries - failures surface immediately to the caller.
pub struct UploadAdapter {
    store: Arc<dyn ObjectStore>,
    directory: String,
    public_files: bool,
    signed_url_expires: u64,
}

impl std::fmt::Debug for UploadAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadAdapter")
            .field("directory", &self.directory)
            .field("public_files", &self.public_files)
            .field("signed_url_expires", &self.signed_url_expires)
            .finish_non_exhaustive()
    }
}

impl UploadAdapter {
    /// Build the adapter against the Supabase Storage backend
    ///
    /// Validates the configuration first and fails with a single
    /// [`ProviderError::ConfigInvalid`] before any client handle is created.
    /// Handle setup performs no network call.
    pub fn from_config(config: ProviderConfig) -> ProviderResult<Self> {
        config.validate()?;
        let store = Arc::new(SupabaseStore::from_config(&config));
        Self::with_store(store, config)
    }

    /// Build the adapter over any [`ObjectStore`] implementation
    pub fn with_store(store: Arc<dyn ObjectStore>, config: ProviderConfig) -> ProviderResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            directory: config.directory,
            public_files: config.public_files,
            signed_url_expires: config.signed_url_expires,
        })
    }

    fn key_for(&self, file: &MediaFile) -> String {
        object_key(&file.hash, &file.ext, &self.directory)
    }
}

#[async_trait]
impl UploadProvider for UploadAdapter {
    async fn upload(&self, file: &MediaFile, body: ByteSource) -> ProviderResult<UploadedUrl> {
        let key = self.key_for(file);
        debug!(key = %key, mime = %file.mime, public = self.public_files, "uploading file");

        self.store
            .upload_object(&key, &file.mime, body)
            .await
            .map_err(|e| ProviderError::upload_failed(e.into_message()))?;

        // The URL value is produced only after a confirmed round trip. A
        // private bucket resolves purely textually: the bare key.
        let url = if self.public_files {
            self.store.public_url(&key)
        } else {
            key
        };
        Ok(UploadedUrl::new(url))
    }

    async fn upload_stream(
        &self,
        file: &MediaFile,
        body: ByteSource,
    ) -> ProviderResult<UploadedUrl> {
        self.upload(file, body).await
    }

    async fn delete(&self, file: &MediaFile) -> ProviderResult<()> {
        // Recompute the key rather than trusting file.url: for public
        // buckets that field holds a full URL, not a key.
        let key = self.key_for(file);
        debug!(key = %key, "deleting file");

        self.store
            .remove_objects(std::slice::from_ref(&key))
            .await
            .map_err(|e| ProviderError::delete_failed(e.into_message()))
    }

    fn check_file_size(&self, file: &MediaFile, size_limit_bytes: f64) -> ProviderResult<()> {
        let size_bytes = kilobytes_to_bytes(file.size_kb);
        if size_bytes > size_limit_bytes {
            return Err(ProviderError::size_limit_exceeded(
                &file.name,
                human_readable_bytes(size_limit_bytes),
            ));
        }
        Ok(())
    }

    fn is_private(&self) -> bool {
        !self.public_files
    }

    async fn signed_url(&self, file: &MediaFile) -> ProviderResult<SignedUrl> {
        if self.public_files {
            // Public objects already carry their permanent URL
            return Ok(SignedUrl::new(file.url.clone()));
        }

        debug!(key = %file.url, expires_in = self.signed_url_expires, "issuing signed url");

        let url = self
            .store
            .create_signed_url(&file.url, self.signed_url_expires)
            .await
            .map_err(|e| ProviderError::signed_url_failed(e.into_message()))?;
        Ok(SignedUrl::new(url))
    }
}
