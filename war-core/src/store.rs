//! The note store
//!
//! Id-indexed arena of `(Note, NoteCell)` pairs with alive flags. Deleting a
//! note only marks it dead so the undo tree can bring it back with the same
//! id; dead slots are reclaimed by compaction when the store nears its
//! configured capacity. Compaction keeps alive notes in insertion order and
//! ids are never reused.

use crate::error::{Error, Result};
use crate::note::{Note, NoteCell, NoteId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot {
    alive: bool,
    note: Note,
    cell: NoteCell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteStore {
    slots: Vec<Slot>,
    #[serde(skip)]
    index: FxHashMap<NoteId, usize>,
    capacity: usize,
    next_id: u64,
}

impl NoteStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            index: FxHashMap::default(),
            capacity,
            next_id: 1,
        }
    }

    /// Rebuild the id index after deserialization.
    pub fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, slot) in self.slots.iter().enumerate() {
            self.index.insert(slot.note.id, i);
        }
    }

    pub fn next_id(&mut self) -> NoteId {
        let id = NoteId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Keep the id counter ahead of externally loaded notes.
    pub fn ensure_next_id_above(&mut self, id: NoteId) {
        if self.next_id <= id.0 {
            self.next_id = id.0 + 1;
        }
    }

    pub fn alive_count(&self) -> usize {
        self.slots.iter().filter(|s| s.alive).count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn insert(&mut self, note: Note, cell: NoteCell) -> Result<NoteId> {
        debug_assert_eq!(note.id, cell.id);
        if self.slots.len() >= self.capacity {
            self.compact();
        }
        if self.slots.len() >= self.capacity {
            return Err(Error::StoreFull {
                capacity: self.capacity,
            });
        }
        let id = note.id;
        self.index.insert(id, self.slots.len());
        self.slots.push(Slot {
            alive: true,
            note,
            cell,
        });
        Ok(id)
    }

    /// Mark a note dead, returning copies of its records for the undo tree.
    pub fn kill(&mut self, id: NoteId) -> Option<(Note, NoteCell)> {
        let idx = *self.index.get(&id)?;
        let slot = &mut self.slots[idx];
        if !slot.alive {
            return None;
        }
        slot.alive = false;
        Some((slot.note, slot.cell))
    }

    /// Bring a killed note back. The slot may have been compacted away, in
    /// which case the payload copy is re-inserted under its original id.
    pub fn revive(&mut self, note: Note, cell: NoteCell) -> Result<()> {
        if let Some(&idx) = self.index.get(&note.id) {
            self.slots[idx].alive = true;
            Ok(())
        } else {
            self.insert(note, cell).map(|_| ())
        }
    }

    pub fn get(&self, id: NoteId) -> Option<(&Note, &NoteCell)> {
        let idx = *self.index.get(&id)?;
        let slot = &self.slots[idx];
        if slot.alive {
            Some((&slot.note, &slot.cell))
        } else {
            None
        }
    }

    pub fn note_mut(&mut self, id: NoteId) -> Option<(&mut Note, &mut NoteCell)> {
        let idx = *self.index.get(&id)?;
        let slot = &mut self.slots[idx];
        if slot.alive {
            Some((&mut slot.note, &mut slot.cell))
        } else {
            None
        }
    }

    pub fn cell_mut(&mut self, id: NoteId) -> Option<&mut NoteCell> {
        let idx = *self.index.get(&id)?;
        let slot = &mut self.slots[idx];
        if slot.alive {
            Some(&mut slot.cell)
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Note, &NoteCell)> {
        self.slots
            .iter()
            .filter(|s| s.alive)
            .map(|s| (&s.note, &s.cell))
    }

    /// First alive note covering the cursor cell, preferring higher layers.
    pub fn at_cell(&self, col: f64, row: u32) -> Option<NoteId> {
        self.iter()
            .filter(|(_, c)| c.covers(col, row))
            .max_by_key(|(n, _)| (n.layer, n.id))
            .map(|(n, _)| n.id)
    }

    /// Ids of alive notes intersecting the column/row rectangle (inclusive
    /// rows, half-open columns).
    pub fn in_region(&self, left_col: f64, right_col: f64, bottom_row: u32, top_row: u32) -> Vec<NoteId> {
        self.iter()
            .filter(|(_, c)| {
                c.row >= bottom_row
                    && c.row <= top_row
                    && c.end_col() > left_col
                    && c.col < right_col
            })
            .map(|(n, _)| n.id)
            .collect()
    }

    /// Alive cells on one row, ordered by column.
    pub fn on_row(&self, row: u32) -> Vec<NoteCell> {
        let mut cells: Vec<NoteCell> = self
            .iter()
            .filter(|(_, c)| c.row == row)
            .map(|(_, c)| *c)
            .collect();
        cells.sort_by(|a, b| a.col.total_cmp(&b.col));
        cells
    }

    pub fn all_ids(&self) -> Vec<NoteId> {
        self.iter().map(|(n, _)| n.id).collect()
    }

    /// Audio-facing snapshot: every alive, unmuted note on a layer in `mask`.
    pub fn audible_notes(&self, mask: crate::LayerMask) -> Vec<Note> {
        self.iter()
            .filter(|(n, c)| !c.muted && mask.contains(n.layer))
            .map(|(n, _)| *n)
            .collect()
    }

    /// Drop dead slots, preserving the order of the survivors.
    pub fn compact(&mut self) {
        let before = self.slots.len();
        self.slots.retain(|s| s.alive);
        self.rebuild_index();
        debug!(before, after = self.slots.len(), "note store compacted");
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
