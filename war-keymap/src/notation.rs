//! Vim-flavored key sequence notation
//!
//! `"gg"` is two plain keys; angle brackets name special keys and modifier
//! chords: `<esc>`, `<cr>`, `<space>`, `<tab>`, `<s-tab>`, `<bs>`,
//! `<c-r>`, `<a-k>`, `<c-a-=>`. Modifier prefixes compose (`<c-s-x>`).

use crate::key::{Key, KeyEvent, Mods};
use war_core::{Error, Result};

/// Parse a whole sequence string into key events.
pub fn parse_sequence(s: &str) -> Result<Vec<KeyEvent>> {
    let mut events = Vec::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '<' {
            let mut token = String::new();
            for t in chars.by_ref() {
                if t == '>' {
                    break;
                }
                token.push(t);
            }
            if token.is_empty() {
                return Err(Error::Key(format!("empty <> token in {s:?}")));
            }
            events.push(parse_token(&token)?);
        } else {
            events.push(KeyEvent::from_char(c));
        }
    }
    Ok(events)
}

fn parse_token(token: &str) -> Result<KeyEvent> {
    let mut mods = Mods::NONE;
    let mut rest = token;
    loop {
        let lower = rest.to_ascii_lowercase();
        let prefix = match lower.as_bytes() {
            [b'c', b'-', ..] => Some(Mods::CTRL),
            [b'a', b'-', ..] | [b'm', b'-', ..] => Some(Mods::ALT),
            [b's', b'-', ..] => Some(Mods::SHIFT),
            _ => None,
        };
        match prefix {
            Some(m) if rest.len() > 2 => {
                mods = mods | m;
                rest = &rest[2..];
            }
            _ => break,
        }
    }
    let key = match rest.to_ascii_lowercase().as_str() {
        "esc" => Key::Escape,
        "cr" | "return" | "enter" => Key::Return,
        "space" => Key::Space,
        "tab" => Key::Tab,
        "bs" => Key::Backspace,
        "left" => Key::Left,
        "right" => Key::Right,
        "up" => Key::Up,
        "down" => Key::Down,
        single if single.chars().count() == 1 => {
            let c = single.chars().next().unwrap();
            let ev = KeyEvent::from_char(c);
            mods = mods | ev.mods;
            ev.key
        }
        other => return Err(Error::Key(format!("unknown key token <{other}>"))),
    };
    Ok(KeyEvent::new(key, mods))
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod tests;
