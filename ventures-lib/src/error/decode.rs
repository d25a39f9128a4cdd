//! DecodeError for the fetch boundary

/// Error converting between untyped records and typed rows.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A fetched row did not match the expected shape.
    #[error("Row from '{collection}' does not decode: {source}")]
    Row {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    /// A typed value could not be turned into a record.
    #[error("Value does not encode as a record: {0}")]
    Encode(serde_json::Error),

    /// The record is missing a required field.
    #[error("Field '{field}' not found in record")]
    Missing { field: String },
}

impl DecodeError {
    /// Creates a new row decode error.
    pub fn row(collection: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Row {
            collection: collection.into(),
            source,
        }
    }

    /// Creates a new missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }
}
