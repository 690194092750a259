use std::path::PathBuf;

use thiserror::Error;

/// Result type alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by sequence building and trial logging.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid design or schema configuration. Fatal at setup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The log directory could not be created. Fatal at setup.
    #[error("could not create log directory {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying filesystem error
        source: std::io::Error,
    },

    /// A record's field set disagrees with the header already written.
    #[error("schema mismatch: log header is [{expected}], record has [{found}]")]
    SchemaMismatch {
        /// Field names pinned by the first written record
        expected: String,
        /// Field names of the offending record
        found: String,
    },

    /// The underlying storage rejected a write.
    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),

    /// A field name outside the record's schema.
    #[error("unknown field {0:?}")]
    UnknownField(String),
}
