//! # supabase-storage-provider: one upload contract over public and private buckets
//!
//! This crate adapts a host media pipeline to Supabase Storage. It exposes a
//! small uniform contract - upload, delete, size-check, URL resolution - and
//! normalizes the backend's two access modes (permanently-public objects and
//! access-controlled objects behind short-lived signed links) so the host
//! never branches on bucket visibility.
//!
//! ## Key features
//!
//! - **One contract, two visibility modes**: public buckets resolve permanent
//!   URLs, private buckets resolve bare keys plus on-demand signed links
//! - **Stream-friendly uploads**: buffer and stream payloads are accepted
//!   uniformly, streams pass through without buffering into memory
//! - **Deterministic keys**: object keys derive from the file's content hash,
//!   extension and configured directory prefix - identical on every platform
//! - **Fail-fast configuration**: missing required values reject at
//!   construction, before any client handle exists
//! - **No hidden recovery**: backend failures surface immediately with the
//!   backend's own message; retries are the caller's decision
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use supabase_storage_provider::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> ProviderResult<()> {
//! // 1. Configure once; apiUrl, apiKey and bucket are required
//! let config = ProviderConfig::new(
//!     "https://my-project.supabase.co",
//!     std::env::var("SUPABASE_SERVICE_KEY").unwrap(),
//!     "media",
//! )
//! .with_directory("uploads")
//! .with_public_files(false)
//! .with_signed_url_expires(3600);
//!
//! let provider = UploadAdapter::from_config(config)?;
//!
//! // 2. Upload a file; the returned URL value is yours to persist
//! let file = MediaFile::new("photo.jpg", "abc123", ".jpg", "image/jpeg", 42.0);
//! let uploaded = provider.upload(&file, ByteSource::buffer(b"...".to_vec())).await?;
//! let file = file.with_url(uploaded.url);
//!
//! // 3. Resolve a readable link (signed for private buckets)
//! let link = provider.signed_url(&file).await?;
//! println!("serve from {}", link.url);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  Host pipeline   │  ← owns file records, persists URLs
//! ├──────────────────┤
//! │  UploadAdapter   │  ← key derivation, visibility branch, size checks
//! ├──────────────────┤
//! │  ObjectStore     │  ← backend primitives (Supabase REST / in-memory)
//! └──────────────────┘
//! ```
//!
//! The adapter is infrastructure, not a service: embed it where your media
//! handling lives and keep business logic out of storage mechanics. Any
//! [`ObjectStore`] implementation can stand in for the real backend -
//! [`MemoryObjectStore`] ships for exactly that.

pub mod adapter;
mod config;
mod error;
pub mod format;
mod memory_store;
pub mod store;
mod supabase_store;
mod types;

pub use adapter::{UploadAdapter, UploadProvider};
pub use config::ProviderConfig;
pub use error::{BackendError, ProviderError, ProviderResult};
pub use memory_store::{MemoryObjectStore, StoredObject};
pub use store::ObjectStore;
pub use supabase_store::SupabaseStore;
pub use types::{ByteSource, ByteStream, MediaFile, SignedUrl, UploadedUrl};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ByteSource, MediaFile, ProviderConfig, ProviderError, ProviderResult, SignedUrl,
        UploadAdapter, UploadProvider, UploadedUrl,
    };
}
