//! Saved views
//!
//! A view snapshot captures the cursor and viewport so a position can be
//! jumped back to later. Slots are kept in save order, capped at the
//! configured count ([`MAX_VIEWS`] by default); a dedicated mode scrolls a
//! selection through them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cursor::Cursor;
use crate::viewport::Viewport;

pub const MAX_VIEWS: usize = 13;

fn default_capacity() -> usize {
    MAX_VIEWS
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewSlot {
    pub cursor: Cursor,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Views {
    slots: Vec<ViewSlot>,
    selected: usize,
    #[serde(default = "default_capacity")]
    capacity: usize,
}

impl Default for Views {
    fn default() -> Self {
        Views::with_capacity(MAX_VIEWS)
    }
}

impl Views {
    pub fn with_capacity(capacity: usize) -> Self {
        Views {
            slots: Vec::new(),
            selected: 0,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn slots(&self) -> &[ViewSlot] {
        &self.slots
    }

    /// Save a snapshot. Ignored once all slots are filled.
    pub fn save(&mut self, cursor: Cursor, viewport: Viewport) {
        if self.slots.len() >= self.capacity {
            debug!("view slots full, save ignored");
            return;
        }
        self.slots.push(ViewSlot { cursor, viewport });
        debug!(slot = self.slots.len() - 1, "view saved");
    }

    pub fn recall(&self, index: usize) -> Option<ViewSlot> {
        self.slots.get(index).copied()
    }

    pub fn recall_selected(&self) -> Option<ViewSlot> {
        self.recall(self.selected)
    }

    pub fn select_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_down(&mut self) {
        if self.selected + 1 < self.slots.len() {
            self.selected += 1;
        }
    }

    /// Remove the selected slot; later slots shift down.
    pub fn delete_selected(&mut self) {
        if self.selected < self.slots.len() {
            self.slots.remove(self.selected);
            if self.selected >= self.slots.len() && self.selected > 0 {
                self.selected -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(col: u32) -> (Cursor, Viewport) {
        let mut cursor = Cursor::default();
        cursor.col = col;
        (cursor, Viewport::default())
    }

    #[test]
    fn save_and_recall() {
        let mut views = Views::default();
        let (cursor, viewport) = snapshot(7);
        views.save(cursor, viewport);
        let slot = views.recall(0).unwrap();
        assert_eq!(slot.cursor.col, 7);
        assert!(views.recall(1).is_none());
    }

    #[test]
    fn save_stops_at_capacity() {
        let mut views = Views::default();
        for i in 0..MAX_VIEWS as u32 + 3 {
            let (cursor, viewport) = snapshot(i);
            views.save(cursor, viewport);
        }
        assert_eq!(views.len(), MAX_VIEWS);
        assert_eq!(views.recall(MAX_VIEWS - 1).unwrap().cursor.col, 12);
    }

    #[test]
    fn configured_capacity_overrides_the_default() {
        let mut views = Views::with_capacity(2);
        for i in 0..5 {
            let (cursor, viewport) = snapshot(i);
            views.save(cursor, viewport);
        }
        assert_eq!(views.len(), 2);
        assert_eq!(views.capacity(), 2);
    }

    #[test]
    fn selection_moves_and_clamps() {
        let mut views = Views::default();
        for i in 0..3 {
            let (cursor, viewport) = snapshot(i);
            views.save(cursor, viewport);
        }
        views.select_up();
        assert_eq!(views.selected(), 0);
        views.select_down();
        views.select_down();
        views.select_down();
        assert_eq!(views.selected(), 2);
        assert_eq!(views.recall_selected().unwrap().cursor.col, 2);
    }

    #[test]
    fn delete_shifts_selection_back() {
        let mut views = Views::default();
        for i in 0..2 {
            let (cursor, viewport) = snapshot(i);
            views.save(cursor, viewport);
        }
        views.select_down();
        views.delete_selected();
        assert_eq!(views.len(), 1);
        assert_eq!(views.selected(), 0);
        views.delete_selected();
        assert!(views.is_empty());
        views.delete_selected();
    }
}
