//! Session Manager
//!
//! Owns the in-memory session and the database; every mutation runs as
//! mutate, persist, then return, so callers always observe state that has
//! already been written. Persisted fields keep their historical key names
//! so an existing store loads unchanged.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use qtrail_storage::Database;

use crate::session::{Direction, Mark, Session, UNNAMED_SOURCE};
use crate::Result;

const KEY_QUESTIONS: &str = "questions";
const KEY_CURRENT_INDEX: &str = "currentIndex";
const KEY_MARKS: &str = "marks";
const KEY_FILE_NAME: &str = "fileName";
const KEY_PAGE_INDEX: &str = "pageIndex";

pub struct SessionManager {
    /// In-memory session, source of truth between loads
    session: Arc<RwLock<Session>>,
    /// Database for persistence
    db: Database,
}

impl SessionManager {
    pub fn new(db: Database) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::empty())),
            db,
        }
    }

    /// Load the persisted session, reconcile it against the host's current
    /// address, and write the reconciled state back.
    ///
    /// An address found in the list wins over the stored cursor (external
    /// navigation across restarts); otherwise the stored cursor and page
    /// stand. Every absent field defaults.
    pub fn load(&self, current_address: Option<&str>) -> Result<Session> {
        let mut session = self.read_persisted()?;
        session.clamp();

        if let Some(address) = current_address {
            if session.reconcile(address) {
                tracing::debug!(
                    index = session.current_index,
                    "Cursor aligned to host address on load"
                );
            }
        }

        self.save_all(&session)?;

        tracing::info!(
            source = %session.source_name,
            items = session.len(),
            index = session.current_index,
            page = session.page_index,
            "Session loaded"
        );

        *self.session.write() = session.clone();
        Ok(session)
    }

    /// Replace the whole session with a freshly imported source file.
    pub fn replace(&self, source_name: String, text: &str) -> Result<Session> {
        let session = Session::from_text(source_name, text);
        self.save_all(&session)?;

        tracing::info!(
            source = %session.source_name,
            items = session.len(),
            "Session replaced from imported file"
        );

        *self.session.write() = session.clone();
        Ok(session)
    }

    /// Step the cursor; returns the URL to navigate to when it moved.
    pub fn step(&self, direction: Direction) -> Result<Option<String>> {
        let mut session = self.session.write();
        if !session.step(direction) {
            return Ok(None);
        }

        self.db.set_values(&[
            (KEY_CURRENT_INDEX, serde_json::to_string(&session.current_index)?),
            (KEY_PAGE_INDEX, serde_json::to_string(&session.page_index)?),
        ])?;

        tracing::debug!(index = session.current_index, "Cursor stepped");
        Ok(session.current_url().map(str::to_string))
    }

    /// Jump the cursor to an absolute index; returns the URL to navigate to
    /// when it moved.
    pub fn select(&self, index: usize) -> Result<Option<String>> {
        let mut session = self.session.write();
        let old_page = session.page_index;
        if !session.select(index) {
            return Ok(None);
        }

        if session.page_index != old_page {
            self.db.set_values(&[
                (KEY_CURRENT_INDEX, serde_json::to_string(&session.current_index)?),
                (KEY_PAGE_INDEX, serde_json::to_string(&session.page_index)?),
            ])?;
        } else {
            self.db.set_value(
                KEY_CURRENT_INDEX,
                &serde_json::to_string(&session.current_index)?,
            )?;
        }

        tracing::debug!(index = session.current_index, "Cursor selected");
        Ok(session.current_url().map(str::to_string))
    }

    /// Turn the displayed page; reports whether anything changed.
    pub fn turn_page(&self, direction: Direction) -> Result<bool> {
        let mut session = self.session.write();
        if !session.turn_page(direction) {
            return Ok(false);
        }

        self.db
            .set_value(KEY_PAGE_INDEX, &serde_json::to_string(&session.page_index)?)?;
        Ok(true)
    }

    /// Mark the item under the cursor; reports whether a mark was stored.
    pub fn mark(&self, mark: Mark) -> Result<bool> {
        let mut session = self.session.write();
        if !session.mark_current(mark) {
            return Ok(false);
        }

        self.db
            .set_value(KEY_MARKS, &serde_json::to_string(&session.marks)?)?;
        Ok(true)
    }

    /// Align the cursor with an externally observed address (page-load
    /// event); reports whether the cursor moved.
    pub fn reconcile(&self, address: &str) -> Result<bool> {
        let mut session = self.session.write();
        if !session.reconcile(address) {
            return Ok(false);
        }

        self.db.set_values(&[
            (KEY_CURRENT_INDEX, serde_json::to_string(&session.current_index)?),
            (KEY_PAGE_INDEX, serde_json::to_string(&session.page_index)?),
        ])?;

        tracing::debug!(
            index = session.current_index,
            "Cursor reconciled with external navigation"
        );
        Ok(true)
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.session.read().clone()
    }

    fn read_persisted(&self) -> Result<Session> {
        let items: Vec<String> = self.read_field(KEY_QUESTIONS)?.unwrap_or_default();
        let current_index: usize = self.read_field(KEY_CURRENT_INDEX)?.unwrap_or(0);
        let marks: HashMap<usize, Mark> = self.read_field(KEY_MARKS)?.unwrap_or_default();
        let source_name: String = self
            .read_field(KEY_FILE_NAME)?
            .unwrap_or_else(|| UNNAMED_SOURCE.to_string());
        let page_index: usize = self.read_field(KEY_PAGE_INDEX)?.unwrap_or(0);

        Ok(Session {
            items,
            current_index,
            marks,
            source_name,
            page_index,
        })
    }

    fn read_field<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.db.get_value(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save_all(&self, session: &Session) -> Result<()> {
        self.db.set_values(&[
            (KEY_QUESTIONS, serde_json::to_string(&session.items)?),
            (KEY_CURRENT_INDEX, serde_json::to_string(&session.current_index)?),
            (KEY_MARKS, serde_json::to_string(&session.marks)?),
            (KEY_FILE_NAME, serde_json::to_string(&session.source_name)?),
            (KEY_PAGE_INDEX, serde_json::to_string(&session.page_index)?),
        ])?;
        Ok(())
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            db: self.db.clone(),
        }
    }
}
