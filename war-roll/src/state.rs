//! Mutable editor state outside the note store itself

use serde::{Deserialize, Serialize};
use war_core::LayerMask;
use war_keymap::Mode;

use crate::cursor::Cursor;
use crate::viewport::Viewport;

/// Cursor blink behaviour, cycled by `<tab>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlinkState {
    /// Fixed-interval blink.
    Blink,
    /// Blink synced to the beat.
    BlinkBpm,
    Off,
}

impl BlinkState {
    pub fn cycle(self) -> Self {
        match self {
            BlinkState::Blink => BlinkState::BlinkBpm,
            BlinkState::BlinkBpm => BlinkState::Off,
            BlinkState::Off => BlinkState::Blink,
        }
    }
}

/// Left-gutter HUD contents, cycled by `<s-tab>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HudState {
    Piano,
    PianoAndLineNumbers,
    LineNumbers,
}

impl HudState {
    pub fn cycle(self) -> Self {
        match self {
            HudState::Piano => HudState::PianoAndLineNumbers,
            HudState::PianoAndLineNumbers => HudState::LineNumbers,
            HudState::LineNumbers => HudState::Piano,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RollState {
    pub mode: Mode,
    pub cursor: Cursor,
    pub viewport: Viewport,
    /// Accumulated count prefix. Cleared by every command.
    pub numeric_prefix: Option<u32>,
    pub layers: LayerMask,
    pub layer_count: u8,
    pub blink: BlinkState,
    pub hud: HudState,
    pub record_octave: i8,
    pub play_gain: f32,
    pub capture_gain: f32,
    pub capture_monitor: bool,
    pub mapped_note: Option<u8>,
    pub gain_increment: f32,
    pub play_head_col: f64,
    /// Anchor cell of the active visual selection.
    pub visual_anchor: Option<(u32, u32)>,
    pub cmdline: String,
    pub quit: bool,
}

impl Default for RollState {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            cursor: Cursor::default(),
            viewport: Viewport::default(),
            numeric_prefix: None,
            layers: LayerMask::default(),
            layer_count: 9,
            blink: BlinkState::Blink,
            hud: HudState::Piano,
            record_octave: 4,
            play_gain: 1.0,
            capture_gain: 1.0,
            capture_monitor: false,
            mapped_note: None,
            gain_increment: 0.05,
            play_head_col: 0.0,
            visual_anchor: None,
            cmdline: String::new(),
            quit: false,
        }
    }
}

impl RollState {
    /// Consume the count prefix, defaulting to 1.
    pub fn take_prefix(&mut self) -> u32 {
        self.numeric_prefix.take().unwrap_or(1).max(1)
    }

    pub fn push_digit(&mut self, d: u8) {
        let cur = self.numeric_prefix.unwrap_or(0);
        self.numeric_prefix = Some(cur.saturating_mul(10).saturating_add(u32::from(d)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_accumulates_and_clears() {
        let mut st = RollState::default();
        st.push_digit(1);
        st.push_digit(2);
        assert_eq!(st.numeric_prefix, Some(12));
        assert_eq!(st.take_prefix(), 12);
        assert_eq!(st.numeric_prefix, None);
        assert_eq!(st.take_prefix(), 1);
    }

    #[test]
    fn blink_and_hud_cycle_back_around() {
        assert_eq!(
            BlinkState::Blink.cycle().cycle().cycle(),
            BlinkState::Blink
        );
        assert_eq!(HudState::Piano.cycle().cycle().cycle(), HudState::Piano);
    }
}
