//! Print the effective configuration

use anyhow::Result;
use war_config::Config;

pub fn run(config: &Config) -> Result<()> {
    let e = &config.engine;
    println!("sample_rate      = {}", e.sample_rate);
    println!("channel_count    = {}", e.channel_count);
    println!("bpm              = {}", e.bpm);
    println!("columns_per_beat = {}", e.columns_per_beat);
    println!("base_frequency   = {}", e.base_frequency);
    println!("base_note        = {}", e.base_note);
    println!("edo              = {}", e.edo);
    println!("default_attack   = {}", e.default_attack);
    println!("default_sustain  = {}", e.default_sustain);
    println!("default_release  = {}", e.default_release);
    println!("default_gain     = {}", e.default_gain);
    println!("gain_increment   = {}", e.gain_increment);
    println!("note_cells_max   = {}", e.note_cells_max);
    println!("views_saved      = {}", e.views_saved);
    println!("layer_count      = {}", e.layer_count);
    println!("leap_increment   = {}", e.leap_increment);
    println!("viewport_max_col = {}", e.viewport_max_col);
    println!("scroll_margins   = {} cols, {} rows", e.scroll_margin_cols, e.scroll_margin_rows);

    let t = &config.theme;
    println!("theme.default.fg = #{:08x}", t.default_fg);
    println!("theme.default.bg = #{:08x}", t.default_bg);
    for (i, color) in t.layer_colors.iter().enumerate() {
        println!("theme.layers[{}]  = #{color:08x}", i + 1);
    }
    Ok(())
}
