//! API error types

use std::time::Duration;

use serde::Deserialize;

/// Errors that can occur during data API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Backend error code (e.g. a Postgres SQLSTATE), if available.
        code: Option<String>,
        /// Remediation hint returned by the backend, if any.
        hint: Option<String>,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

/// Error body shape returned by PostgREST-style APIs.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
    hint: Option<String>,
    details: Option<String>,
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            code: None,
            hint: None,
        }
    }

    /// Builds an HTTP error from a response body.
    ///
    /// Structured bodies contribute their message, code and hint. Anything else
    /// is kept verbatim as the message.
    pub fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => {
                let message = parsed
                    .message
                    .or(parsed.details)
                    .unwrap_or_else(|| body.to_string());
                Self::Http {
                    status,
                    message,
                    code: parsed.code,
                    hint: parsed.hint,
                }
            }
            Err(_) => Self::http(status, body),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the backend error code if available.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Http { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_structured_body() {
        let body = r#"{"code":"23505","message":"duplicate key value","hint":null,"details":"Key (id)=(1) already exists."}"#;
        let err = ApiError::from_body(409, body);

        assert_eq!(err.status_code(), Some(409));
        assert_eq!(err.error_code(), Some("23505"));
        assert_eq!(err.to_string(), "HTTP 409: duplicate key value");
    }

    #[test]
    fn test_from_plain_body() {
        let err = ApiError::from_body(502, "Bad Gateway");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
        assert_eq!(err.error_code(), None);
    }
}
