//! QTrail Storage Layer
//!
//! SQLite-based persistence for overlay session state.
//! The session is stored as a flat key-value table so any field may be
//! written independently and absent fields default on read.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
