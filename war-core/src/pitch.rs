//! Pitch and tuning math
//!
//! Rows on the roll are MIDI-style pitches. Frequency is derived from an
//! equal-division tuning: `base_frequency * 2^((pitch - base_note) / edo)`.
//! The defaults give standard 12-EDO with A4 = 440 Hz at pitch 69.

use serde::{Deserialize, Serialize};

pub const MAX_MIDI_NOTES: u16 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pitch(pub u8);

impl Pitch {
    pub fn frequency(&self, tuning: &Tuning) -> f64 {
        tuning.base_frequency
            * 2f64.powf((self.0 as f64 - tuning.base_note as f64) / tuning.edo as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub base_frequency: f64,
    pub base_note: u8,
    pub edo: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_frequency: 440.0,
            base_note: 69,
            edo: 12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concert_a_is_base_frequency() {
        assert_eq!(Pitch(69).frequency(&Tuning::default()), 440.0);
    }

    #[test]
    fn octave_doubles_frequency() {
        let tuning = Tuning::default();
        let a4 = Pitch(69).frequency(&tuning);
        let a5 = Pitch(81).frequency(&tuning);
        assert!((a5 - 2.0 * a4).abs() < 1e-9);
    }

    #[test]
    fn middle_c_is_close_to_reference() {
        let c4 = Pitch(60).frequency(&Tuning::default());
        assert!((c4 - 261.6256).abs() < 1e-3);
    }

    #[test]
    fn edo_changes_step_size() {
        let tuning = Tuning {
            base_frequency: 440.0,
            base_note: 69,
            edo: 24,
        };
        // 24 steps per octave: pitch 93 is one octave up.
        let up = Pitch(93).frequency(&tuning);
        assert!((up - 880.0).abs() < 1e-9);
    }
}
