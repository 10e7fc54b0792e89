//! Error types for the Europeana SDK.

use europeana_domain::DomainError;
use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// No API key available; nothing was sent
    #[error("No API key configured (set EUROPEANA_API_KEY or the profile api_key)")]
    MissingApiKey,

    /// Connection error (network, DNS, timeout, etc.)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// API key rejected
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Entity or endpoint does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Too many requests for this key
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Any other non-success HTTP status
    #[error("API error (HTTP {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// Response body is not the JSON that was expected
    #[error("Invalid response: {0}")]
    DecodeError(String),

    /// Field missing or malformed in an otherwise valid response
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl SdkError {
    /// Map a non-success status and its body to an error
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = error_message(body);
        match status {
            401 | 403 => SdkError::AuthError(message),
            404 => SdkError::NotFound(message),
            429 => SdkError::RateLimited,
            _ => SdkError::ApiError { status, message },
        }
    }
}

/// `error` / `message` of a JSON error body, or the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            ["error", "message"]
                .iter()
                .find_map(|key| json.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.trim().to_string()
            }
        })
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the `wskey`
        let e = e.without_url();
        if e.is_connect() || e.is_timeout() {
            SdkError::ConnectionError(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) => SdkError::from_status(status.as_u16(), &e.to_string()),
                None => SdkError::ConnectionError(e.to_string()),
            }
        } else if e.is_decode() {
            SdkError::DecodeError(e.to_string())
        } else {
            SdkError::ConnectionError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::DecodeError(format!("JSON parsing error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            SdkError::from_status(401, r#"{"success":false,"error":"Invalid API key"}"#),
            SdkError::AuthError(msg) if msg == "Invalid API key"
        ));
        assert!(matches!(SdkError::from_status(404, ""), SdkError::NotFound(_)));
        assert!(matches!(SdkError::from_status(429, ""), SdkError::RateLimited));
        assert!(matches!(
            SdkError::from_status(500, "boom"),
            SdkError::ApiError { status: 500, message } if message == "boom"
        ));
    }

    #[test]
    fn test_domain_error_is_transparent() {
        let err: SdkError = DomainError::missing("prefLabel").into();
        assert_eq!(err.to_string(), "Field 'prefLabel' not present for this entity");
    }
}
