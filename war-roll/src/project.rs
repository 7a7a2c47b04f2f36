//! Project persistence
//!
//! A project file is the JSON snapshot of everything worth keeping between
//! sessions: grid and tuning, layer state, every alive note, and the saved
//! views. Transient state (cursor, undo history, mode) is not persisted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use war_core::{Error, LayerMask, Note, NoteCell, Result, TimeGrid, Tuning};

use crate::editor::Editor;
use crate::views::Views;

pub const PROJECT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub version: u32,
    pub grid: TimeGrid,
    pub tuning: Tuning,
    pub layers: LayerMask,
    pub layer_count: u8,
    pub notes: Vec<(Note, NoteCell)>,
    pub views: Views,
}

impl Project {
    pub fn from_editor(editor: &Editor) -> Self {
        Self {
            version: PROJECT_VERSION,
            grid: editor.grid,
            tuning: editor.tuning,
            layers: editor.state.layers,
            layer_count: editor.state.layer_count,
            notes: editor.store.iter().map(|(n, c)| (*n, *c)).collect(),
            views: editor.views.clone(),
        }
    }

    /// Load the snapshot into an editor, replacing its notes and views.
    pub fn install(self, editor: &mut Editor) -> Result<()> {
        editor.grid = self.grid;
        editor.tuning = self.tuning;
        editor.state.layers = self.layers;
        editor.state.layer_count = self.layer_count;
        editor.views = self.views;
        editor.store = war_core::NoteStore::new(editor.options.note_capacity);
        let mut max_id = war_core::NoteId(0);
        for (note, cell) in self.notes {
            max_id = max_id.max(note.id);
            editor.store.insert(note, cell)?;
        }
        editor.store.ensure_next_id_above(max_id);
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Project(format!("serialize: {e}")))?;
        fs::write(path, json)?;
        info!(path = %path.display(), notes = self.notes.len(), "project written");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let project: Project = serde_json::from_str(&json)
            .map_err(|e| Error::Project(format!("parse {}: {e}", path.display())))?;
        if project.version != PROJECT_VERSION {
            return Err(Error::Project(format!(
                "unsupported project version {}",
                project.version
            )));
        }
        Ok(project)
    }
}
