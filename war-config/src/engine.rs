//! The engine constant table

use mlua::Table;
use serde::Serialize;

use crate::number;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineConfig {
    pub sample_rate: u32,
    pub channel_count: u16,
    pub bpm: f64,
    pub columns_per_beat: f64,
    pub base_frequency: f64,
    pub base_note: u8,
    pub edo: u32,
    pub default_attack: f32,
    pub default_sustain: f32,
    pub default_release: f32,
    pub default_gain: f32,
    pub note_cells_max: usize,
    pub views_saved: usize,
    pub layer_count: u8,
    pub repeat_delay_ms: u64,
    pub repeat_rate_ms: u64,
    pub cursor_blink_ms: u64,
    pub gain_increment: f32,
    pub leap_increment: u32,
    pub scroll_margin_cols: u32,
    pub scroll_margin_rows: u32,
    pub viewport_max_col: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            channel_count: 2,
            bpm: 100.0,
            columns_per_beat: 4.0,
            base_frequency: 440.0,
            base_note: 69,
            edo: 12,
            default_attack: 0.005,
            default_sustain: 0.8,
            default_release: 0.05,
            default_gain: 1.0,
            note_cells_max: 100_000,
            views_saved: 13,
            layer_count: 9,
            repeat_delay_ms: 300,
            repeat_rate_ms: 30,
            cursor_blink_ms: 530,
            gain_increment: 0.05,
            leap_increment: 4,
            scroll_margin_cols: 4,
            scroll_margin_rows: 4,
            viewport_max_col: 4096,
        }
    }
}

macro_rules! load_fields {
    ($table:expr, $cfg:expr, $($field:ident),+ $(,)?) => {
        $(if let Some(n) = number($table, stringify!($field)) {
            $cfg.$field = n as _;
        })+
    };
}

impl EngineConfig {
    /// Override fields from the `war` table; non-number values keep defaults.
    pub(crate) fn apply_table(&mut self, table: &Table) {
        load_fields!(
            table, self, sample_rate, channel_count, base_note, edo, note_cells_max,
            views_saved, layer_count, repeat_delay_ms, repeat_rate_ms,
            cursor_blink_ms, leap_increment, scroll_margin_cols, scroll_margin_rows,
            viewport_max_col, bpm, columns_per_beat, base_frequency, default_attack,
            default_sustain, default_release, default_gain, gain_increment,
        );
        // LayerMask is 64 bits wide.
        self.layer_count = self.layer_count.clamp(1, 64);
    }
}
