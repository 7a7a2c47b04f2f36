//! Branching undo history
//!
//! Every edit is recorded as a node in a tree rather than a linear stack,
//! so undoing and then editing keeps the old branch reachable. Redo follows
//! the most recent branch first.

use serde::{Deserialize, Serialize};
use tracing::debug;
use war_core::{Note, NoteCell, NoteStore, Result};

/// A reversible edit, carrying the affected notes by value so that
/// undo/redo never depends on store slots staying live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EditOp {
    AddNote(Note, NoteCell),
    DeleteNote(Note, NoteCell),
    AddNotes(Vec<(Note, NoteCell)>),
    DeleteNotes(Vec<(Note, NoteCell)>),
}

impl EditOp {
    fn apply(&self, store: &mut NoteStore) -> Result<()> {
        match self {
            EditOp::AddNote(n, c) => store.revive(*n, *c)?,
            EditOp::DeleteNote(n, _) => {
                store.kill(n.id);
            }
            EditOp::AddNotes(pairs) => {
                for (n, c) in pairs {
                    store.revive(*n, *c)?;
                }
            }
            EditOp::DeleteNotes(pairs) => {
                for (n, _) in pairs {
                    store.kill(n.id);
                }
            }
        }
        Ok(())
    }

    fn revert(&self, store: &mut NoteStore) -> Result<()> {
        match self {
            EditOp::AddNote(n, _) => {
                store.kill(n.id);
            }
            EditOp::DeleteNote(n, c) => store.revive(*n, *c)?,
            EditOp::AddNotes(pairs) => {
                for (n, _) in pairs {
                    store.kill(n.id);
                }
            }
            EditOp::DeleteNotes(pairs) => {
                for (n, c) in pairs {
                    store.revive(*n, *c)?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UndoNode {
    op: EditOp,
    parent: Option<usize>,
    /// Newest branch first; redo follows `children[0]`.
    children: Vec<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UndoTree {
    nodes: Vec<UndoNode>,
    /// Edits recorded from the pristine document, newest first.
    roots: Vec<usize>,
    /// Node whose edit is currently applied, `None` at the pristine root.
    current: Option<usize>,
}

impl UndoTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Record an edit that has already been applied to the store.
    pub fn record(&mut self, op: EditOp) {
        let idx = self.nodes.len();
        self.nodes.push(UndoNode {
            op,
            parent: self.current,
            children: Vec::new(),
        });
        match self.current {
            Some(parent) => self.nodes[parent].children.insert(0, idx),
            None => self.roots.insert(0, idx),
        }
        self.current = Some(idx);
        debug!(node = idx, "recorded edit");
    }

    /// Revert the current edit. Returns false at the pristine root.
    pub fn undo(&mut self, store: &mut NoteStore) -> Result<bool> {
        let Some(idx) = self.current else {
            return Ok(false);
        };
        self.nodes[idx].op.revert(store)?;
        self.current = self.nodes[idx].parent;
        debug!(node = idx, "undo");
        Ok(true)
    }

    /// Re-apply the most recent branch forward of the current node.
    pub fn redo(&mut self, store: &mut NoteStore) -> Result<bool> {
        let next = match self.current {
            Some(idx) => self.nodes[idx].children.first().copied(),
            None => self.roots.first().copied(),
        };
        let Some(idx) = next else {
            return Ok(false);
        };
        self.nodes[idx].op.apply(store)?;
        self.current = Some(idx);
        debug!(node = idx, "redo");
        Ok(true)
    }

    /// Re-apply the most recent branch besides the preferred one.
    pub fn redo_alt(&mut self, store: &mut NoteStore) -> Result<bool> {
        let alt = match self.current {
            Some(idx) => self.nodes[idx].children.get(1).copied(),
            None => self.roots.get(1).copied(),
        };
        let Some(idx) = alt else {
            return Ok(false);
        };
        self.nodes[idx].op.apply(store)?;
        self.current = Some(idx);
        debug!(node = idx, "redo alt");
        Ok(true)
    }
}

#[cfg(test)]
#[path = "undo_tests.rs"]
mod tests;
