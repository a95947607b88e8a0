//! Inlay Engine Error Hierarchy
//!
//! Defines the error types surfaced by the cache, metadata and
//! reconciliation layers, categorized by the subsystem that raised them.
//!
//! Absence is never an error: a key missing from the authoritative store is
//! reported as `Ok(None)` / `false` by the operations that look it up.

use std::path::PathBuf;

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Metadata persistence failures (sled, filesystem)
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration loading or validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Raw inlay data present but not in a recognized shape
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The authoritative inlay store failed to answer
    #[error("Authoritative store error: {0}")]
    Authority(String),

    /// The resource allocator could not create or release a handle
    #[error("Resource allocation failed: {0}")]
    Allocation(String),

    /// Unrecoverable failures requiring process termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Disk I/O failures
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Failure bound to a concrete path
    #[error("Error occurred at path: {path}")]
    PathError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Embedded sled database errors
    #[error(transparent)]
    SledError(#[from] sled::Error),

    /// Generic embedded database errors
    #[error("Embedded database error: {0}")]
    DbError(String),

    /// Persisted value could not be read back
    #[error("Corrupted metadata value for key {key}: {reason}")]
    CorruptValue { key: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Encoded payload does not start with `data:`
    #[error("Payload is not a data URI")]
    NotDataUri,

    /// Data URI header carries no media type
    #[error("Data URI has no media type")]
    MissingMime,

    /// Body is not valid base64
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
}

// ============== Conversion Implementations ============== //
impl From<sled::Error> for Error {
    fn from(e: sled::Error) -> Self {
        Error::Storage(StorageError::SledError(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Storage(StorageError::IoError(e))
    }
}
