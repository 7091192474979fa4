//! QTrail Session Management
//!
//! The session is one mutable record: the ordered item list, the cursor,
//! the per-item marks, the source file name, and the displayed page.
//! - The session auto-saves on any mutation
//! - Importing a new source file replaces the session entirely
//! - Browser restart must restore the session exactly
//! - Sessions are local-only (no cross-device sync)

mod error;
mod manager;
mod session;
mod view;

pub use error::SessionError;
pub use manager::SessionManager;
pub use session::{Direction, Mark, Session, PAGE_SIZE, UNNAMED_SOURCE};
pub use view::{PageEntry, PageView};

pub type Result<T> = std::result::Result<T, SessionError>;
