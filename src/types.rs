use bytes::Bytes;
use futures_core::Stream;
use std::pin::Pin;

/// Stream of bytes for file payloads
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// File payload: an in-memory buffer or a readable stream, never both
///
/// Streams are handed to the backend as-is, without buffering into memory.
pub enum ByteSource {
    Buffer(Bytes),
    Stream(ByteStream),
}

impl ByteSource {
    /// Wrap an in-memory buffer
    pub fn buffer<B: Into<Bytes>>(bytes: B) -> Self {
        Self::Buffer(bytes.into())
    }

    /// Wrap a byte stream
    pub fn stream(stream: ByteStream) -> Self {
        Self::Stream(stream)
    }
}

impl std::fmt::Debug for ByteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buffer(bytes) => f.debug_tuple("Buffer").field(&bytes.len()).finish(),
            Self::Stream(_) => f.debug_tuple("Stream").finish(),
        }
    }
}

/// Host-owned file metadata supplied per call
///
/// The provider never mutates a `MediaFile`; operations return the new
/// `url` value for the host to apply. For private buckets the `url` field
/// holds the bare object key after upload, and signed-URL issuance reads it
/// back as that key.
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Display name, used in size-limit messages
    pub name: String,

    /// Content-derived identifier, the stem of the object key
    pub hash: String,

    /// Extension including the separator, e.g. `.jpg`
    pub ext: String,

    /// MIME type sent as the upload content type
    pub mime: String,

    /// Size in kilobytes (decimal, 1 KB = 1000 bytes) as supplied by the host
    pub size_kb: f64,

    /// Current externally-visible URL: empty before upload, then either the
    /// full public URL or the bare object key depending on bucket visibility
    pub url: String,
}

impl MediaFile {
    pub fn new<N, H, E, M>(name: N, hash: H, ext: E, mime: M, size_kb: f64) -> Self
    where
        N: Into<String>,
        H: Into<String>,
        E: Into<String>,
        M: Into<String>,
    {
        Self {
            name: name.into(),
            hash: hash.into(),
            ext: ext.into(),
            mime: mime.into(),
            size_kb,
            url: String::new(),
        }
    }

    /// Set the current URL value (typically applied from an `UploadedUrl`)
    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = url.into();
        self
    }
}

/// URL value produced by a successful upload, applied by the host
///
/// Holds the full public URL for public buckets, or the bare object key for
/// private buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedUrl {
    pub url: String,
}

impl UploadedUrl {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self { url: url.into() }
    }
}

/// Time-limited link for reading an access-controlled object
///
/// Ephemeral: never written back onto the file record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    pub url: String,
}

impl SignedUrl {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_file_builder() {
        let file = MediaFile::new("photo.jpg", "abc123", ".jpg", "image/jpeg", 42.0)
            .with_url("abc123.jpg");
        assert_eq!(file.url, "abc123.jpg");
        assert_eq!(file.hash, "abc123");
    }

    #[test]
    fn test_byte_source_debug_hides_content() {
        let source = ByteSource::buffer(vec![1u8, 2, 3]);
        assert_eq!(format!("{:?}", source), "Buffer(3)");
    }
}
