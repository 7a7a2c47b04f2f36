//! The beat/column/frame time grid
//!
//! The piano roll addresses time in grid columns; the audio engine addresses
//! time in sample frames. `TimeGrid` is the single place those two views are
//! converted: `columns_per_beat` columns make one beat, and one beat lasts
//! `sample_rate * 60 / bpm` frames.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    pub sample_rate: u32,
    pub bpm: f64,
    pub columns_per_beat: f64,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            bpm: 100.0,
            columns_per_beat: 4.0,
        }
    }
}

impl TimeGrid {
    pub fn new(sample_rate: u32, bpm: f64, columns_per_beat: f64) -> Self {
        Self {
            sample_rate,
            bpm,
            columns_per_beat,
        }
    }

    pub fn frames_per_beat(&self) -> f64 {
        self.sample_rate as f64 * 60.0 / self.bpm
    }

    /// Convert a (possibly fractional) column position to an absolute frame,
    /// rounding half up.
    pub fn col_to_frames(&self, col: f64) -> u64 {
        let beats = col / self.columns_per_beat;
        (beats * self.frames_per_beat() + 0.5) as u64
    }

    /// Convert an absolute frame back to a fractional column position.
    pub fn frames_to_col(&self, frames: u64) -> f64 {
        let beats = frames as f64 / self.frames_per_beat();
        beats * self.columns_per_beat
    }

    pub fn frames_per_column(&self) -> f64 {
        self.frames_per_beat() / self.columns_per_beat
    }
}

#[cfg(test)]
#[path = "grid_tests.rs"]
mod tests;
