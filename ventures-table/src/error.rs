use thiserror::Error;

/// Errors raised while building a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A column without a render function names a key the row type lacks.
    #[error("column {column:?} reads unknown field {key:?} (known fields: {known})")]
    UnknownField {
        /// The column's label.
        column: String,
        /// The key it reads.
        key: String,
        /// The row type's fields, comma separated.
        known: String,
    },
}
