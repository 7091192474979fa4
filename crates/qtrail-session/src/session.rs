//! Session data structure
//!
//! All state transitions go through the methods here; each one reports
//! whether it changed anything so the manager knows what to persist.
//! Out-of-range moves are silent no-ops, never errors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Items rendered per page.
pub const PAGE_SIZE: usize = 50;

/// Label shown before any source file has been loaded.
pub const UNNAMED_SOURCE: &str = "(none)";

/// Review status for a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Correct,
    Wrong,
    Forgotten,
}

/// Direction for cursor stepping and page turning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Ordered item URLs, identity = position in file order
    pub items: Vec<String>,
    /// Cursor, 0-based; meaningful only when `items` is non-empty
    pub current_index: usize,
    /// Marks keyed by item index; absence means unmarked
    pub marks: HashMap<usize, Mark>,
    /// Name of the imported source file
    pub source_name: String,
    /// Displayed page; may diverge from the cursor's page while browsing
    pub page_index: usize,
}

impl Session {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            current_index: 0,
            marks: HashMap::new(),
            source_name: UNNAMED_SOURCE.to_string(),
            page_index: 0,
        }
    }

    /// Build a fresh session from raw source-file text: split on newlines,
    /// trim, drop blank lines. Every non-empty line is accepted as-is.
    pub fn from_text(source_name: String, text: &str) -> Self {
        let items: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            items,
            current_index: 0,
            marks: HashMap::new(),
            source_name,
            page_index: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// URL under the cursor, if any.
    pub fn current_url(&self) -> Option<&str> {
        self.items.get(self.current_index).map(String::as_str)
    }

    /// Page count, never less than one (an empty list still shows page 1).
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Page containing a given item index.
    pub fn page_for(index: usize) -> usize {
        index / PAGE_SIZE
    }

    /// Move the cursor one step. Returns false at either boundary or when
    /// the list is empty.
    pub fn step(&mut self, direction: Direction) -> bool {
        if self.items.is_empty() {
            return false;
        }

        match direction {
            Direction::Prev => {
                if self.current_index == 0 {
                    return false;
                }
                self.current_index -= 1;
            }
            Direction::Next => {
                if self.current_index + 1 >= self.items.len() {
                    return false;
                }
                self.current_index += 1;
            }
        }

        self.page_index = Self::page_for(self.current_index);
        true
    }

    /// Jump the cursor to an absolute item index. Returns false when the
    /// index is the cursor itself or out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() || index == self.current_index {
            return false;
        }

        self.current_index = index;
        self.page_index = Self::page_for(self.current_index);
        true
    }

    /// Turn the displayed page without moving the cursor. Clamped to the
    /// valid page range; returns false at either boundary.
    pub fn turn_page(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Prev => {
                if self.page_index == 0 {
                    return false;
                }
                self.page_index -= 1;
            }
            Direction::Next => {
                if self.page_index + 1 >= self.total_pages() {
                    return false;
                }
                self.page_index += 1;
            }
        }
        true
    }

    /// Mark the item under the cursor, overwriting any prior mark.
    /// Returns false when the list is empty.
    pub fn mark_current(&mut self, mark: Mark) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.marks.insert(self.current_index, mark);
        true
    }

    /// Align the cursor with an externally observed address. Returns true
    /// when the address is in the list at a position other than the cursor;
    /// the page follows the cursor.
    pub fn reconcile(&mut self, address: &str) -> bool {
        if self.items.is_empty() {
            return false;
        }

        match self.items.iter().position(|url| url == address) {
            Some(index) if index != self.current_index => {
                self.current_index = index;
                self.page_index = Self::page_for(index);
                true
            }
            _ => false,
        }
    }

    /// Restore the cursor invariant after loading persisted state that no
    /// longer fits the list (e.g. a truncated store).
    pub fn clamp(&mut self) {
        if self.items.is_empty() {
            self.current_index = 0;
        } else if self.current_index >= self.items.len() {
            self.current_index = self.items.len() - 1;
        }

        let last_page = self.total_pages() - 1;
        if self.page_index > last_page {
            self.page_index = last_page;
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(count: usize) -> Session {
        let text: String = (0..count)
            .map(|i| format!("https://example.com/q/{}\n", i))
            .collect();
        Session::from_text("drill.txt".to_string(), &text)
    }

    #[test]
    fn test_from_text_drops_blank_lines() {
        let session =
            Session::from_text("a.txt".to_string(), "https://a\n\n  \nhttps://b\nhttps://c  \n");

        assert_eq!(session.items, vec!["https://a", "https://b", "https://c"]);
        assert_eq!(session.current_index, 0);
        assert_eq!(session.page_index, 0);
        assert!(session.marks.is_empty());
        assert_eq!(session.source_name, "a.txt");
    }

    #[test]
    fn test_step_boundaries() {
        let mut session = session_with(3);

        // Prev at the first item is ignored
        assert!(!session.step(Direction::Prev));
        assert_eq!(session.current_index, 0);

        assert!(session.step(Direction::Next));
        assert!(session.step(Direction::Next));
        assert_eq!(session.current_index, 2);

        // Next at the last item is ignored
        assert!(!session.step(Direction::Next));
        assert_eq!(session.current_index, 2);
    }

    #[test]
    fn test_step_on_empty() {
        let mut session = Session::empty();
        assert!(!session.step(Direction::Next));
        assert!(!session.step(Direction::Prev));
    }

    #[test]
    fn test_step_crosses_page_boundary() {
        let mut session = session_with(60);
        session.current_index = 49;

        assert!(session.step(Direction::Next));
        assert_eq!(session.current_index, 50);
        assert_eq!(session.page_index, 1);

        assert!(session.step(Direction::Prev));
        assert_eq!(session.current_index, 49);
        assert_eq!(session.page_index, 0);
    }

    #[test]
    fn test_select_recomputes_page() {
        let mut session = session_with(130);

        assert!(session.select(120));
        assert_eq!(session.current_index, 120);
        assert_eq!(session.page_index, 2);

        // Selecting the cursor itself is a no-op
        assert!(!session.select(120));
        // Out of range is ignored
        assert!(!session.select(500));
        assert_eq!(session.current_index, 120);
    }

    #[test]
    fn test_turn_page_independent_of_cursor() {
        let mut session = session_with(130);

        assert!(session.turn_page(Direction::Next));
        assert_eq!(session.page_index, 1);
        assert_eq!(session.current_index, 0);

        assert!(session.turn_page(Direction::Next));
        // 130 items = 3 pages; page 2 is the last
        assert!(!session.turn_page(Direction::Next));
        assert_eq!(session.page_index, 2);

        assert!(session.turn_page(Direction::Prev));
        assert!(session.turn_page(Direction::Prev));
        assert!(!session.turn_page(Direction::Prev));
        assert_eq!(session.page_index, 0);
        assert_eq!(session.current_index, 0);
    }

    #[test]
    fn test_mark_overwrites() {
        let mut session = session_with(3);

        assert!(session.mark_current(Mark::Wrong));
        assert!(session.mark_current(Mark::Correct));
        assert_eq!(session.marks.get(&0), Some(&Mark::Correct));
        assert_eq!(session.marks.len(), 1);

        let mut empty = Session::empty();
        assert!(!empty.mark_current(Mark::Correct));
    }

    #[test]
    fn test_reconcile() {
        let mut session = session_with(3);

        assert!(session.reconcile("https://example.com/q/2"));
        assert_eq!(session.current_index, 2);

        // Same position again: nothing to do
        assert!(!session.reconcile("https://example.com/q/2"));

        // Unknown address: cursor untouched
        assert!(!session.reconcile("https://elsewhere.example"));
        assert_eq!(session.current_index, 2);
    }

    #[test]
    fn test_clamp() {
        let mut session = session_with(3);
        session.current_index = 10;
        session.page_index = 5;
        session.clamp();
        assert_eq!(session.current_index, 2);
        assert_eq!(session.page_index, 0);
    }

    #[test]
    fn test_total_pages_minimum_one() {
        assert_eq!(Session::empty().total_pages(), 1);
        assert_eq!(session_with(50).total_pages(), 1);
        assert_eq!(session_with(51).total_pages(), 2);
    }
}
