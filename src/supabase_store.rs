use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::format::{bearer_token, storage_endpoint};
use crate::{BackendError, ByteSource, ObjectStore, ProviderConfig};

/// Cache directive sent with every upload
const CACHE_CONTROL: &str = "max-age=3600";

/// Supabase Storage REST client implementing [`ObjectStore`]
///
/// Holds the composed storage endpoint, the target bucket and the raw
/// service-role key. Constructing the client performs no network call.
pub struct SupabaseStore {
    client: Client,
    endpoint: String,
    bucket: String,
    api_key: String,
    bearer: String,
}

/// Batch-remove request body: `DELETE /object/<bucket>` takes the key list
/// under `prefixes`
#[derive(Debug, Serialize)]
struct RemoveRequest<'a> {
    prefixes: &'a [String],
}

#[derive(Debug, Serialize)]
struct SignRequest {
    #[serde(rename = "expiresIn")]
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

/// Error body shape returned by the storage API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl SupabaseStore {
    /// Create a store handle from validated configuration
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: storage_endpoint(&config.api_url),
            bucket: config.bucket.clone(),
            api_key: config.api_key.clone(),
            bearer: bearer_token(&config.api_key),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/object/{}/{}", self.endpoint, self.bucket, key)
    }

    async fn check_response(response: Response) -> Result<(), BackendError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::backend_error(response).await)
        }
    }

    async fn backend_error(response: Response) -> BackendError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        BackendError::new(parse_error_message(status, &body))
    }
}

/// Extract the backend's own message from an error response
///
/// Prefers the JSON body's `message` field, then its `error` field, then the
/// raw body text, then the bare HTTP status.
fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.filter(|m| !m.is_empty()) {
            return message;
        }
        if let Some(error) = parsed.error.filter(|e| !e.is_empty()) {
            return error;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl ObjectStore for SupabaseStore {
    async fn upload_object(
        &self,
        key: &str,
        content_type: &str,
        body: ByteSource,
    ) -> Result<(), BackendError> {
        debug!(bucket = %self.bucket, key, "uploading object");

        let payload = match body {
            ByteSource::Buffer(bytes) => reqwest::Body::from(bytes),
            ByteSource::Stream(stream) => reqwest::Body::wrap_stream(stream),
        };

        let response = self
            .client
            .post(self.object_url(key))
            .header("apikey", self.api_key.as_str())
            .header(header::AUTHORIZATION, self.bearer.as_str())
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, CACHE_CONTROL)
            .header("x-upsert", "true")
            .body(payload)
            .send()
            .await?;

        Self::check_response(response).await
    }

    async fn remove_objects(&self, keys: &[String]) -> Result<(), BackendError> {
        debug!(bucket = %self.bucket, count = keys.len(), "removing objects");

        let response = self
            .client
            .delete(format!("{}/object/{}", self.endpoint, self.bucket))
            .header("apikey", self.api_key.as_str())
            .header(header::AUTHORIZATION, self.bearer.as_str())
            .json(&RemoveRequest { prefixes: keys })
            .send()
            .await?;

        Self::check_response(response).await
    }

    async fn create_signed_url(&self, key: &str, expires_in: u64) -> Result<String, BackendError> {
        debug!(bucket = %self.bucket, key, expires_in, "signing object url");

        let response = self
            .client
            .post(format!("{}/object/sign/{}/{}", self.endpoint, self.bucket, key))
            .header("apikey", self.api_key.as_str())
            .header(header::AUTHORIZATION, self.bearer.as_str())
            .json(&SignRequest { expires_in })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        let signed: SignResponse = response
            .json()
            .await
            .map_err(|e| BackendError::new(e.to_string()))?;

        // The API returns a path relative to the storage endpoint
        Ok(format!("{}{}", self.endpoint, signed.signed_url))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/object/public/{}/{}", self.endpoint, self.bucket, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SupabaseStore {
        let config = ProviderConfig::new("https://abc.supabase.co", "service-key", "media");
        SupabaseStore::from_config(&config)
    }

    #[test]
    fn test_public_url_composition() {
        assert_eq!(
            store().public_url("uploads/abc123.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/media/uploads/abc123.jpg"
        );
    }

    #[test]
    fn test_object_url_composition() {
        assert_eq!(
            store().object_url("abc123.jpg"),
            "https://abc.supabase.co/storage/v1/object/media/abc123.jpg"
        );
    }

    #[test]
    fn test_parse_error_message_prefers_message_field() {
        let body = r#"{"statusCode":"404","error":"Not Found","message":"Object not found"}"#;
        assert_eq!(
            parse_error_message(StatusCode::NOT_FOUND, body),
            "Object not found"
        );
    }

    #[test]
    fn test_parse_error_message_falls_back_to_error_field() {
        let body = r#"{"error":"Bad Request"}"#;
        assert_eq!(
            parse_error_message(StatusCode::BAD_REQUEST, body),
            "Bad Request"
        );
    }

    #[test]
    fn test_parse_error_message_falls_back_to_body_text() {
        assert_eq!(
            parse_error_message(StatusCode::BAD_GATEWAY, "upstream unavailable"),
            "upstream unavailable"
        );
    }

    #[test]
    fn test_parse_error_message_falls_back_to_status() {
        assert_eq!(
            parse_error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "500 Internal Server Error"
        );
    }

    #[test]
    fn test_sign_request_wire_shape() {
        let body = serde_json::to_string(&SignRequest { expires_in: 3600 }).unwrap();
        assert_eq!(body, r#"{"expiresIn":3600}"#);
    }

    #[test]
    fn test_sign_response_parsing() {
        let signed: SignResponse =
            serde_json::from_str(r#"{"signedURL":"/object/sign/media/abc123.jpg?token=opaque"}"#)
                .unwrap();
        assert_eq!(
            signed.signed_url,
            "/object/sign/media/abc123.jpg?token=opaque"
        );
    }
}
