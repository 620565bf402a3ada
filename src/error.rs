use thiserror::Error;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors surfaced by the upload provider
///
/// Backend messages are embedded verbatim; nothing is retried or swallowed
/// inside the provider. `ConfigInvalid` is fatal and only raised at
/// construction time.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Invalid provider configuration: missing {missing}")]
    ConfigInvalid { missing: String },

    #[error("Failed to upload file to Supabase: {message}")]
    UploadFailed { message: String },

    #[error("Failed to delete file from Supabase: {message}")]
    DeleteFailed { message: String },

    #[error("Failed to generate signed URL: {message}")]
    SignedUrlFailed { message: String },

    #[error("{name} exceeds size limit of {limit}")]
    SizeLimitExceeded { name: String, limit: String },
}

impl ProviderError {
    /// Create a configuration error listing the missing fields
    pub fn config_invalid<S: Into<String>>(missing: S) -> Self {
        Self::ConfigInvalid {
            missing: missing.into(),
        }
    }

    /// Create an upload failure wrapping the backend's message
    pub fn upload_failed<S: Into<String>>(message: S) -> Self {
        Self::UploadFailed {
            message: message.into(),
        }
    }

    /// Create a delete failure wrapping the backend's message
    pub fn delete_failed<S: Into<String>>(message: S) -> Self {
        Self::DeleteFailed {
            message: message.into(),
        }
    }

    /// Create a signed-URL failure wrapping the backend's message
    pub fn signed_url_failed<S: Into<String>>(message: S) -> Self {
        Self::SignedUrlFailed {
            message: message.into(),
        }
    }

    /// Create a size-limit rejection for a named file
    pub fn size_limit_exceeded<N: Into<String>, L: Into<String>>(name: N, limit: L) -> Self {
        Self::SizeLimitExceeded {
            name: name.into(),
            limit: limit.into(),
        }
    }
}

/// Raw error carried across the store seam
///
/// Holds the backend's own message text; the adapter wraps it into the
/// operation-specific `ProviderError` variant.
#[derive(Debug, Clone)]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for BackendError {}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_error_display() {
        let err = ProviderError::upload_failed("bucket not found");
        assert_eq!(
            err.to_string(),
            "Failed to upload file to Supabase: bucket not found"
        );
    }

    #[test]
    fn test_delete_error_display() {
        let err = ProviderError::delete_failed("object missing");
        assert_eq!(
            err.to_string(),
            "Failed to delete file from Supabase: object missing"
        );
    }

    #[test]
    fn test_signed_url_error_display() {
        let err = ProviderError::signed_url_failed("invalid token");
        assert_eq!(
            err.to_string(),
            "Failed to generate signed URL: invalid token"
        );
    }

    #[test]
    fn test_size_limit_error_display() {
        let err = ProviderError::size_limit_exceeded("photo.jpg", "50.00 KB");
        assert_eq!(err.to_string(), "photo.jpg exceeds size limit of 50.00 KB");
    }

    #[test]
    fn test_backend_error_message() {
        let err = BackendError::new("upstream said no");
        assert_eq!(err.message(), "upstream said no");
        assert_eq!(err.to_string(), "upstream said no");
    }
}
