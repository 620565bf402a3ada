use crate::{ProviderError, ProviderResult};

/// Configuration for the Supabase upload provider
///
/// Supplied once by the host at construction time and immutable afterwards.
/// `api_url`, `api_key` and `bucket` are required; the rest default.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Project base URL, e.g. `https://<project>.supabase.co`
    pub api_url: String,

    /// Service-role API key. A secret: never logged, redacted in Debug output.
    pub api_key: String,

    /// Target bucket name
    pub bucket: String,

    /// Key prefix inside the bucket
    pub directory: String,

    /// Whether the bucket serves permanently-public objects
    pub public_files: bool,

    /// Signed-link lifetime in seconds for private buckets
    pub signed_url_expires: u64,
}

impl ProviderConfig {
    /// Default signed-link lifetime: 1 hour
    pub const DEFAULT_SIGNED_URL_EXPIRES: u64 = 3600;

    /// Create a config with the required fields and defaults for the rest
    pub fn new<U, K, B>(api_url: U, api_key: K, bucket: B) -> Self
    where
        U: Into<String>,
        K: Into<String>,
        B: Into<String>,
    {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            bucket: bucket.into(),
            directory: String::new(),
            public_files: true,
            signed_url_expires: Self::DEFAULT_SIGNED_URL_EXPIRES,
        }
    }

    /// Set the key prefix
    pub fn with_directory<S: Into<String>>(mut self, directory: S) -> Self {
        self.directory = directory.into();
        self
    }

    /// Set the bucket visibility mode
    pub fn with_public_files(mut self, public_files: bool) -> Self {
        self.public_files = public_files;
        self
    }

    /// Set the signed-link lifetime in seconds
    pub fn with_signed_url_expires(mut self, secs: u64) -> Self {
        self.signed_url_expires = secs;
        self
    }

    /// Check the required fields, naming every missing one in a single error
    pub fn validate(&self) -> ProviderResult<()> {
        let mut missing = Vec::new();
        if self.api_url.is_empty() {
            missing.push("apiUrl");
        }
        if self.api_key.is_empty() {
            missing.push("apiKey");
        }
        if self.bucket.is_empty() {
            missing.push("bucket");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ProviderError::config_invalid(missing.join(", ")))
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("directory", &self.directory)
            .field("public_files", &self.public_files)
            .field("signed_url_expires", &self.signed_url_expires)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ProviderConfig {
        ProviderConfig::new("https://abc.supabase.co", "service-role-key", "media")
    }

    #[test]
    fn test_defaults() {
        let config = base_config();
        assert_eq!(config.directory, "");
        assert!(config.public_files);
        assert_eq!(
            config.signed_url_expires,
            ProviderConfig::DEFAULT_SIGNED_URL_EXPIRES
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = base_config()
            .with_directory("uploads")
            .with_public_files(false)
            .with_signed_url_expires(600);
        assert_eq!(config.directory, "uploads");
        assert!(!config.public_files);
        assert_eq!(config.signed_url_expires, 600);
    }

    #[test]
    fn test_validate_ok() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_bucket() {
        let config = ProviderConfig::new("https://abc.supabase.co", "key", "");
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid provider configuration: missing bucket"
        );
    }

    #[test]
    fn test_validate_lists_every_missing_field() {
        let config = ProviderConfig::new("", "", "");
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid provider configuration: missing apiUrl, apiKey, bucket"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let debugged = format!("{:?}", base_config());
        assert!(debugged.contains("<redacted>"));
        assert!(!debugged.contains("service-role-key"));
    }
}
