//! Overlay controller
//!
//! Central state container for the overlay. All mutation funnels through
//! the operations here: each one updates the session, persists it, and only
//! then drives host navigation, so the browser never shows a state that was
//! not written first. Every operation returns the fresh page view for the
//! host to render.

use std::path::Path;
use std::sync::Arc;

use qtrail_session::{Direction, Mark, PageView, SessionManager};
use qtrail_storage::Database;

use crate::config::Config;
use crate::error::CoreError;
use crate::host::Host;
use crate::Result;

pub struct Overlay {
    /// Configuration
    config: Config,
    /// Session manager
    session_manager: SessionManager,
    /// Host browser collaborator
    host: Arc<dyn Host>,
}

impl Overlay {
    /// Open the overlay against its database. Call [`Overlay::initialize`]
    /// afterwards to load and reconcile the persisted session.
    pub fn new(config: Config, host: Arc<dyn Host>) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        let session_manager = SessionManager::new(db);

        Ok(Self {
            config,
            session_manager,
            host,
        })
    }

    /// Overlay backed by an in-memory database, for tests and embedding.
    pub fn in_memory(host: Arc<dyn Host>) -> Result<Self> {
        let db = Database::open_in_memory()?;

        Ok(Self {
            config: Config::default(),
            session_manager: SessionManager::new(db),
            host,
        })
    }

    /// Load the persisted session and reconcile it against the address the
    /// host is currently showing. Does not navigate; the session as stored
    /// (or as corrected by the host's address) is simply re-rendered.
    pub fn initialize(&self) -> Result<PageView> {
        let address = self.host.current_address();
        self.session_manager.load(address.as_deref())?;

        tracing::info!("Overlay initialized");
        Ok(self.view())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session_manager(&self) -> &SessionManager {
        &self.session_manager
    }

    /// Current page projection for the host to render.
    pub fn view(&self) -> PageView {
        PageView::project(&self.session_manager.session())
    }

    /// Replace the session with raw source-file text, then jump the host to
    /// the first item.
    pub fn import_text(&self, source_name: String, text: &str) -> Result<PageView> {
        let session = self.session_manager.replace(source_name, text)?;

        if let Some(url) = session.current_url() {
            self.navigate_if_changed(url);
        }

        Ok(self.view())
    }

    /// Read a `.txt` source file from disk and import it. Any other
    /// extension is rejected, matching the host file picker's restriction.
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<PageView> {
        let path = path.as_ref();

        if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
            return Err(CoreError::UnsupportedFile(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path)?;
        let source_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("questions.txt")
            .to_string();

        self.import_text(source_name, &text)
    }

    /// Move the cursor one item back or forward. Out-of-range moves are
    /// silently ignored.
    pub fn step(&self, direction: Direction) -> Result<PageView> {
        if let Some(url) = self.session_manager.step(direction)? {
            self.navigate_if_changed(&url);
        }

        Ok(self.view())
    }

    /// Jump the cursor to an item picked from the displayed page.
    pub fn select(&self, index: usize) -> Result<PageView> {
        if let Some(url) = self.session_manager.select(index)? {
            self.navigate_if_changed(&url);
        }

        Ok(self.view())
    }

    /// Turn the displayed page without moving the cursor.
    pub fn turn_page(&self, direction: Direction) -> Result<PageView> {
        self.session_manager.turn_page(direction)?;
        Ok(self.view())
    }

    /// Tag the item under the cursor with a review status.
    pub fn mark(&self, mark: Mark) -> Result<PageView> {
        self.session_manager.mark(mark)?;
        Ok(self.view())
    }

    /// Page-load hook: if the host ended up on a listed item by some other
    /// route (back button, manual address entry), pull the cursor after it.
    pub fn on_page_load(&self) -> Result<PageView> {
        if let Some(address) = self.host.current_address() {
            self.session_manager.reconcile(&address)?;
        }

        Ok(self.view())
    }

    fn navigate_if_changed(&self, url: &str) {
        if self.host.current_address().as_deref() == Some(url) {
            return;
        }
        self.host.navigate(url);
    }
}
