//! Storage error types

/// Message shown when an upload fails without a usable explanation.
pub const GENERIC_UPLOAD_MESSAGE: &str = "Upload failed. Please try again.";

/// Errors that can occur while uploading a file.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The storage service refused the upload.
    #[error("Upload rejected ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message returned by the service, if any.
        message: Option<String>,
    },

    /// The object path is empty or escapes the bucket.
    #[error("Invalid object path: {0:?}")]
    InvalidPath(String),

    /// The upload never reached the service.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service could not be reached for another reason (e.g. a timeout).
    #[error("Storage unreachable: {0}")]
    Unreachable(String),
}

impl StorageError {
    /// Text suitable for a user-facing notification.
    ///
    /// Uses the service's message when there is one, otherwise a generic
    /// message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::InvalidPath(path) => format!("Invalid file path: {}", path),
            Self::Unreachable(message) => message.clone(),
            _ => GENERIC_UPLOAD_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_service_message() {
        let err = StorageError::Rejected {
            status: 413,
            message: Some("The object exceeded the maximum allowed size".into()),
        };
        assert_eq!(
            err.user_message(),
            "The object exceeded the maximum allowed size"
        );
    }

    #[test]
    fn test_user_message_falls_back_to_generic() {
        let err = StorageError::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_UPLOAD_MESSAGE);

        let blank = StorageError::Rejected {
            status: 500,
            message: Some("   ".into()),
        };
        assert_eq!(blank.user_message(), GENERIC_UPLOAD_MESSAGE);
    }
}
