//! Theme palette

use mlua::{Table, Value};
use serde::Serialize;
use tracing::debug;
use war_core::{Error, Result};

/// Parse `#rrggbb` or `#rrggbbaa` into packed RGBA. A six-digit color gets
/// full alpha; any other length is an error.
pub fn hex_to_rgba(hex: &str) -> Result<u32> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let parsed = u32::from_str_radix(digits, 16)
        .map_err(|e| Error::Config(format!("bad hex color {hex:?}: {e}")))?;
    match digits.len() {
        6 => Ok(parsed << 8 | 0xff),
        8 => Ok(parsed),
        n => Err(Error::Config(format!(
            "hex color {hex:?} has {n} digits, want 6 or 8"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub default_fg: u32,
    pub default_bg: u32,
    pub cursor_multi_layer: u32,
    pub layer_colors: [u32; 9],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            default_fg: hex("#c0caf5"),
            default_bg: hex("#1a1b26"),
            cursor_multi_layer: hex("#ffffff"),
            layer_colors: [
                hex("#4363d8"),
                hex("#e6194b"),
                hex("#3cb44b"),
                hex("#ffe119"),
                hex("#f58231"),
                hex("#911eb4"),
                hex("#46f0f0"),
                hex("#f032e6"),
                hex("#bcf60c"),
            ],
        }
    }
}

fn hex(s: &str) -> u32 {
    match hex_to_rgba(s) {
        Ok(c) => c,
        Err(_) => 0xffffffff,
    }
}

impl Theme {
    /// Override colors from a `theme` table:
    /// `theme.default.fg/bg`, `theme.cursor_multi_layer`, `theme.layers[i]`.
    pub(crate) fn apply_table(&mut self, table: &Table) -> Result<()> {
        if let Ok(Value::Table(default)) = table.get::<_, Value>("default") {
            if let Ok(fg) = default.get::<_, String>("fg") {
                self.default_fg = hex_to_rgba(&fg)?;
            }
            if let Ok(bg) = default.get::<_, String>("bg") {
                self.default_bg = hex_to_rgba(&bg)?;
            }
        }
        if let Ok(color) = table.get::<_, String>("cursor_multi_layer") {
            self.cursor_multi_layer = hex_to_rgba(&color)?;
        }
        if let Ok(Value::Table(layers)) = table.get::<_, Value>("layers") {
            for (i, slot) in self.layer_colors.iter_mut().enumerate() {
                match layers.get::<_, Value>(i + 1) {
                    Ok(Value::String(s)) => *slot = hex_to_rgba(s.to_str().unwrap_or(""))?,
                    Ok(Value::Nil) | Err(_) => {}
                    Ok(other) => debug!(layer = i, value = ?other, "ignoring non-string color"),
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digits_get_full_alpha() {
        assert_eq!(hex_to_rgba("#4363d8").unwrap(), 0x4363d8ff);
        assert_eq!(hex_to_rgba("ffffff").unwrap(), 0xffffffff);
    }

    #[test]
    fn eight_digits_keep_alpha() {
        assert_eq!(hex_to_rgba("#4363d880").unwrap(), 0x4363d880);
    }

    #[test]
    fn wrong_lengths_are_errors() {
        assert!(hex_to_rgba("#fff").is_err());
        assert!(hex_to_rgba("#12345").is_err());
        assert!(hex_to_rgba("#gghhii").is_err());
    }
}
