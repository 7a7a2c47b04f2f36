//! Note records
//!
//! Each note on the roll exists twice: as an audio-facing `Note` addressed in
//! sample frames, and as an editor-facing `NoteCell` addressed in grid
//! columns and rows. Both carry the same id and are stored together so
//! editing and rendering never disagree about which notes exist.

use crate::pitch::Pitch;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NoteId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub start_frames: u64,
    pub duration_frames: u64,
    pub pitch: Pitch,
    pub layer: u32,
    pub gain: f32,
    pub attack: f32,
    pub sustain: f32,
    pub release: f32,
    pub phase_increment: f32,
}

/// Exact cell width or navigation step as whole cells plus a proper fraction
/// of a cell. Kept in fraction form so repeated sub-cell motions accumulate
/// without float drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellFraction {
    pub whole: u32,
    pub numer: u32,
    pub denom: u32,
}

impl CellFraction {
    pub fn whole(cells: u32) -> Self {
        Self {
            whole: cells,
            numer: 0,
            denom: 1,
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.whole as f64 + self.numer as f64 / self.denom.max(1) as f64
    }
}

impl Default for CellFraction {
    fn default() -> Self {
        Self::whole(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteCell {
    pub id: NoteId,
    pub col: f64,
    pub row: u32,
    pub layer: u32,
    pub width: CellFraction,
    pub color: u32,
    pub outline_color: u32,
    pub gain: f32,
    pub voice: u32,
    pub hidden: bool,
    pub muted: bool,
}

impl NoteCell {
    pub fn end_col(&self) -> f64 {
        self.col + self.width.as_f64()
    }

    /// True when the cell covers `col` on `row`.
    pub fn covers(&self, col: f64, row: u32) -> bool {
        self.row == row && col >= self.col && col < self.end_col()
    }
}
