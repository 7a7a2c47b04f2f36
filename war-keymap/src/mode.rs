//! Editor modes

use serde::{Deserialize, Serialize};

/// The ten editor modes. `Pending` is the operator-pending state entered by
/// prefixes like `d` and `<space>`; `Capture` is live sample capture while
/// `Midi` is the mapped-keyboard record mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Normal,
    Views,
    VisualLine,
    Capture,
    Midi,
    Command,
    VisualBlock,
    Insert,
    Pending,
    Visual,
}

impl Mode {
    pub const COUNT: usize = 10;

    pub fn index(&self) -> usize {
        match self {
            Mode::Normal => 0,
            Mode::Views => 1,
            Mode::VisualLine => 2,
            Mode::Capture => 3,
            Mode::Midi => 4,
            Mode::Command => 5,
            Mode::VisualBlock => 6,
            Mode::Insert => 7,
            Mode::Pending => 8,
            Mode::Visual => 9,
        }
    }

    pub fn is_visual(&self) -> bool {
        matches!(self, Mode::Visual | Mode::VisualLine | Mode::VisualBlock)
    }
}
