//! Page view projection
//!
//! Pure read-only projection of a session into the window the overlay
//! renders: one indicator per item on the current page.

use serde::Serialize;

use crate::session::{Mark, Session, PAGE_SIZE};

/// One indicator cell on the current page.
#[derive(Debug, Clone, Serialize)]
pub struct PageEntry {
    /// Absolute position in the item list
    pub global_index: usize,
    /// 1-based label shown to the user
    pub label: usize,
    pub url: String,
    pub mark: Option<Mark>,
    /// True when this entry is under the cursor
    pub is_current: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub source_name: String,
    pub item_count: usize,
    /// 1-based page number shown to the user
    pub page_number: usize,
    pub total_pages: usize,
    pub entries: Vec<PageEntry>,
}

impl PageView {
    pub fn project(session: &Session) -> Self {
        let start = session.page_index * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(session.items.len());

        let entries = session
            .items
            .get(start..end)
            .unwrap_or(&[])
            .iter()
            .enumerate()
            .map(|(offset, url)| {
                let global_index = start + offset;
                PageEntry {
                    global_index,
                    label: global_index + 1,
                    url: url.clone(),
                    mark: session.marks.get(&global_index).copied(),
                    is_current: global_index == session.current_index,
                }
            })
            .collect();

        Self {
            source_name: session.source_name.clone(),
            item_count: session.items.len(),
            page_number: session.page_index + 1,
            total_pages: session.total_pages(),
            entries,
        }
    }
}
