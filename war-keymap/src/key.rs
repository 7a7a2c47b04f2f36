//! Keys, modifiers and normalization

use serde::{Deserialize, Serialize};

/// Modifier bitmask. Mirrors the usual seat modifier set even though the
/// engine itself only binds shift/ctrl/alt today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Mods(pub u8);

impl Mods {
    pub const NONE: Mods = Mods(0);
    pub const SHIFT: Mods = Mods(1 << 0);
    pub const CTRL: Mods = Mods(1 << 1);
    pub const ALT: Mods = Mods(1 << 2);
    pub const LOGO: Mods = Mods(1 << 3);
    pub const CAPS: Mods = Mods(1 << 4);
    pub const NUM: Mods = Mods(1 << 5);

    pub fn contains(&self, other: Mods) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for Mods {
    type Output = Mods;
    fn bitor(self, rhs: Mods) -> Mods {
        Mods(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Lowercase ASCII character; shifted characters are normalized to the
    /// lowercase key plus the SHIFT modifier.
    Char(char),
    Escape,
    Return,
    Space,
    Tab,
    Backspace,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub mods: Mods,
}

impl KeyEvent {
    pub fn new(key: Key, mods: Mods) -> Self {
        Self { key, mods }
    }

    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c), Mods::NONE)
    }

    /// Normalize a raw character event: uppercase letters and shifted
    /// punctuation become the base key with SHIFT set, so bindings only ever
    /// name lowercase keys.
    pub fn from_char(c: char) -> Self {
        if c.is_ascii_uppercase() {
            return Self::new(Key::Char(c.to_ascii_lowercase()), Mods::SHIFT);
        }
        let shifted = |base| Self::new(Key::Char(base), Mods::SHIFT);
        match c {
            '!' => shifted('1'),
            '@' => shifted('2'),
            '#' => shifted('3'),
            '$' => shifted('4'),
            '%' => shifted('5'),
            '^' => shifted('6'),
            '&' => shifted('7'),
            '*' => shifted('8'),
            '(' => shifted('9'),
            ')' => shifted('0'),
            '_' => shifted('-'),
            '+' => shifted('='),
            ':' => shifted(';'),
            '"' => shifted('\''),
            '<' => shifted(','),
            '>' => shifted('.'),
            '?' => shifted('/'),
            '{' => shifted('['),
            '}' => shifted(']'),
            _ => Self::char(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercase_normalizes_to_shift() {
        assert_eq!(
            KeyEvent::from_char('G'),
            KeyEvent::new(Key::Char('g'), Mods::SHIFT)
        );
    }

    #[test]
    fn shifted_punctuation_normalizes() {
        assert_eq!(
            KeyEvent::from_char('$'),
            KeyEvent::new(Key::Char('4'), Mods::SHIFT)
        );
        assert_eq!(
            KeyEvent::from_char(':'),
            KeyEvent::new(Key::Char(';'), Mods::SHIFT)
        );
    }

    #[test]
    fn plain_chars_pass_through() {
        assert_eq!(KeyEvent::from_char('j'), KeyEvent::char('j'));
    }

    #[test]
    fn mods_compose() {
        let m = Mods::CTRL | Mods::ALT;
        assert!(m.contains(Mods::CTRL));
        assert!(m.contains(Mods::ALT));
        assert!(!m.contains(Mods::SHIFT));
    }
}
