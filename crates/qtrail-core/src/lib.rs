//! QTrail Core
//!
//! Central coordination layer for the question-trail overlay. The core owns
//! all state; the host browser is a collaborator behind the [`Host`] seam
//! and renders whatever [`PageView`] it is handed.

mod config;
mod error;
mod host;
mod overlay;

pub use config::Config;
pub use error::CoreError;
pub use host::Host;
pub use overlay::Overlay;

// Re-export core components
pub use qtrail_session::{
    Direction, Mark, PageEntry, PageView, Session, SessionError, SessionManager, PAGE_SIZE,
};
pub use qtrail_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
