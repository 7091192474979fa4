//! Core error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] qtrail_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] qtrail_session::SessionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported source file (expected .txt): {0}")]
    UnsupportedFile(PathBuf),
}
