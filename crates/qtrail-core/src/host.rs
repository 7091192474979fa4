//! Host browser seam
//!
//! The surrounding page is an external collaborator: the core only needs
//! to read the current address and to request navigation. Mounting the
//! panel and wiring its widgets to [`crate::Overlay`] is the host's job.

/// Collaborator interface implemented by the embedding browser host.
pub trait Host: Send + Sync {
    /// Address the browser is currently showing, if any.
    fn current_address(&self) -> Option<String>;

    /// Point the browser at a new address. Fire-and-forget: navigation has
    /// no completion signal and failures are not surfaced.
    fn navigate(&self, url: &str);
}
