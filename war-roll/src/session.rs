//! Key session
//!
//! Glue between the keymap FSM and the editor: feeds events, replays the
//! retry key when a sequence breaks, and takes over raw input while the
//! command line is open.

use std::path::Path;

use tracing::{trace, warn};
use war_core::{Error, Result};
use war_keymap::{Feed, Key, KeyEvent, Keymap, Mode, Mods};

use crate::bindings::default_keymap;
use crate::command::Command;
use crate::editor::{Applied, Editor};
use crate::project::Project;

pub struct Session {
    pub keymap: Keymap<Command>,
    pub editor: Editor,
}

impl Session {
    pub fn new(editor: Editor) -> Result<Self> {
        Ok(Self {
            keymap: default_keymap()?,
            editor,
        })
    }

    /// Feed one key event. At most one editor command results, except when a
    /// broken sequence resolves a held prefix and retries the breaking key.
    pub fn feed(&mut self, ev: KeyEvent) -> Result<Applied> {
        if self.editor.state.mode == Mode::Command {
            return self.feed_cmdline(ev);
        }
        match self.keymap.feed(self.editor.state.mode, ev) {
            Feed::Command(cmd) => self.editor.apply(cmd),
            Feed::Pending => Ok(Applied::default()),
            Feed::Broken { resolved, retry } => {
                let mut applied = Applied::default();
                if let Some(cmd) = resolved {
                    applied = self.editor.apply(cmd)?;
                }
                match self.keymap.feed(self.editor.state.mode, retry) {
                    Feed::Command(cmd) => {
                        let retried = self.editor.apply(cmd)?;
                        if retried != Applied::default() {
                            applied = retried;
                        }
                    }
                    Feed::Pending => {}
                    other => trace!(?other, "retry key unresolved"),
                }
                Ok(applied)
            }
            Feed::Unmapped(ev) => {
                trace!(?ev, "unmapped key");
                Ok(Applied::default())
            }
        }
    }

    /// Resolve a held terminal prefix at end of input or sequence timeout.
    pub fn flush(&mut self) -> Result<Applied> {
        match self.keymap.flush() {
            Some(cmd) => self.editor.apply(cmd),
            None => Ok(Applied::default()),
        }
    }

    fn feed_cmdline(&mut self, ev: KeyEvent) -> Result<Applied> {
        match ev.key {
            Key::Escape => self.editor.apply(Command::EscapeReset),
            Key::Return => {
                let line = std::mem::take(&mut self.editor.state.cmdline);
                self.editor.state.mode = Mode::Normal;
                self.execute_cmdline(line.trim())
            }
            Key::Backspace => {
                self.editor.state.cmdline.pop();
                Ok(Applied::default())
            }
            Key::Space => {
                self.editor.state.cmdline.push(' ');
                Ok(Applied::default())
            }
            Key::Char(c) => {
                self.editor.state.cmdline.push(denormalize(c, ev.mods));
                Ok(Applied::default())
            }
            _ => Ok(Applied::default()),
        }
    }

    /// The minimal command line: `q` quits, `w <path>` writes the project,
    /// `bpm <n>` retunes the grid.
    fn execute_cmdline(&mut self, line: &str) -> Result<Applied> {
        let mut applied = Applied::default();
        let (head, rest) = match line.split_once(' ') {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        match head {
            "" => {}
            "q" => {
                self.editor.state.quit = true;
                applied.quit = true;
            }
            "w" => {
                if rest.is_empty() {
                    return Err(Error::Project("write needs a path".into()));
                }
                Project::from_editor(&self.editor).save(Path::new(rest))?;
            }
            "bpm" => {
                let bpm: f64 = rest
                    .parse()
                    .map_err(|_| Error::Project(format!("bad bpm {rest:?}")))?;
                if bpm <= 0.0 {
                    return Err(Error::Project(format!("bad bpm {bpm}")));
                }
                self.editor.grid.bpm = bpm;
            }
            other => warn!(command = other, "unknown command line"),
        }
        Ok(applied)
    }
}

/// Undo the shift normalization for command-line text entry.
fn denormalize(c: char, mods: Mods) -> char {
    if !mods.contains(Mods::SHIFT) {
        return c;
    }
    match c {
        '1' => '!',
        '2' => '@',
        '3' => '#',
        '4' => '$',
        '5' => '%',
        '6' => '^',
        '7' => '&',
        '8' => '*',
        '9' => '(',
        '0' => ')',
        '-' => '_',
        '=' => '+',
        ';' => ':',
        '\'' => '"',
        ',' => '<',
        '.' => '>',
        '/' => '?',
        '[' => '{',
        ']' => '}',
        _ => c.to_ascii_uppercase(),
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
