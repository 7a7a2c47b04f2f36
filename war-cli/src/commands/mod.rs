//! Subcommand implementations

pub mod check_config;
pub mod inspect;
pub mod keys;
pub mod render;

use war_config::Config;
use war_core::{TimeGrid, Tuning};
use war_roll::{Editor, EditorOptions};

/// Build an editor with the config's constants and theme.
pub fn editor_from_config(config: &Config) -> Editor {
    let engine = &config.engine;
    let grid = TimeGrid::new(engine.sample_rate, engine.bpm, engine.columns_per_beat);
    let tuning = Tuning {
        base_frequency: engine.base_frequency,
        base_note: engine.base_note,
        edo: engine.edo,
    };
    let options = EditorOptions {
        note_capacity: engine.note_cells_max,
        default_attack: engine.default_attack,
        default_sustain: engine.default_sustain,
        default_release: engine.default_release,
        leap_increment: engine.leap_increment,
        views_saved: engine.views_saved,
        layer_colors: config.theme.layer_colors,
        multi_layer_color: config.theme.cursor_multi_layer,
    };
    let mut editor = Editor::new(grid, tuning, options);
    editor.state.layer_count = engine.layer_count;
    editor.state.gain_increment = engine.gain_increment;
    editor.state.viewport.max_col = engine.viewport_max_col;
    editor.state.viewport.scroll_margin_cols = engine.scroll_margin_cols;
    editor.state.viewport.scroll_margin_rows = engine.scroll_margin_rows;
    editor
}
