//! Error types

mod api;
mod decode;
mod storage;

pub use api::*;
pub use decode::*;
pub use storage::*;

/// Top-level error for data source operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The data API rejected the request or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A row could not be decoded into its typed shape.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A file upload failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A mutation matched no rows.
    #[error("no {collection} row matches {key}")]
    NotFound {
        /// The collection that was targeted.
        collection: String,
        /// Description of the filter that matched nothing.
        key: String,
    },

    /// The collection cannot be served (used by in-memory sources).
    #[error("{collection} unavailable: {message}")]
    Unavailable {
        /// The collection that failed.
        collection: String,
        /// Why it failed.
        message: String,
    },

    /// The operation was cancelled before it completed.
    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    /// Creates a not-found error for a collection and key description.
    pub fn not_found(collection: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            key: key.into(),
        }
    }

    /// Returns the HTTP status code if this came from an HTTP response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status_code(),
            Self::Storage(StorageError::Rejected { status, .. }) => Some(*status),
            _ => None,
        }
    }
}
