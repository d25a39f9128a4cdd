use std::io;
use std::path::PathBuf;

use thiserror::Error;
use ventures_lib::error::ApiError;
use ventures_table::TableError;

use crate::config::ConfigError;

/// Errors that end a CLI invocation.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Could not connect to the backend: {0}")]
    Connect(#[from] ApiError),

    #[error(transparent)]
    Source(#[from] ventures_lib::Error),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Could not read {}: {source}", path.display())]
    ReadFile { path: PathBuf, source: io::Error },

    #[error("Terminal output failed: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Usage(String),
}
