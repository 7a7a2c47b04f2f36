//! The compiled keymap trie
//!
//! Sequences are compiled into states with per-event transitions. Terminal
//! states carry one command slot per mode; a mode without its own command
//! falls back to the Normal-mode command. A state may be both terminal and a
//! prefix (`<space>` plays, `<space>v` saves a view) — the walker holds the
//! terminal as pending until the next key either extends the sequence or
//! breaks it.

use crate::key::KeyEvent;
use crate::mode::Mode;
use rustc_hash::FxHashMap;
use tracing::trace;
use war_core::{Error, Result};

#[derive(Debug, Clone, Copy)]
pub struct Binding<C> {
    pub command: C,
    pub handle_repeat: bool,
    pub handle_release: bool,
    pub handle_timeout: bool,
}

impl<C> Binding<C> {
    pub fn new(command: C) -> Self {
        Self {
            command,
            handle_repeat: false,
            handle_release: false,
            handle_timeout: false,
        }
    }

    pub fn repeating(command: C) -> Self {
        Self {
            handle_repeat: true,
            ..Self::new(command)
        }
    }
}

struct State<C> {
    next: FxHashMap<KeyEvent, usize>,
    commands: [Option<Binding<C>>; Mode::COUNT],
}

impl<C> State<C> {
    fn new() -> Self {
        Self {
            next: FxHashMap::default(),
            commands: std::array::from_fn(|_| None),
        }
    }
}

/// Result of feeding one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed<C> {
    /// A sequence resolved to a command.
    Command(C),
    /// Mid-sequence; more keys may follow.
    Pending,
    /// The key broke the current sequence. If a terminal prefix had already
    /// matched its command is surfaced; `retry` should be fed again from the
    /// root.
    Broken { resolved: Option<C>, retry: KeyEvent },
    /// No binding starts with this key.
    Unmapped(KeyEvent),
}

pub struct Keymap<C> {
    states: Vec<State<C>>,
    current: usize,
    pending_terminal: Option<Binding<C>>,
}

impl<C: Copy> Keymap<C> {
    pub fn new() -> Self {
        Self {
            states: vec![State::new()],
            current: 0,
            pending_terminal: None,
        }
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Bind a sequence in one mode. Rebinding an existing sequence replaces
    /// the previous command for that mode.
    pub fn bind(&mut self, mode: Mode, seq: &[KeyEvent], binding: Binding<C>) -> Result<()> {
        if seq.is_empty() {
            return Err(Error::Key("cannot bind an empty sequence".into()));
        }
        let mut state = 0usize;
        for ev in seq {
            let next = match self.states[state].next.get(ev) {
                Some(&next) => next,
                None => {
                    let next = self.states.len();
                    self.states.push(State::new());
                    self.states[state].next.insert(*ev, next);
                    next
                }
            };
            state = next;
        }
        self.states[state].commands[mode.index()] = Some(binding);
        Ok(())
    }

    pub fn bind_normal(&mut self, seq: &[KeyEvent], binding: Binding<C>) -> Result<()> {
        self.bind(Mode::Normal, seq, binding)
    }

    /// Command at a state for a mode, with Normal fallback.
    fn resolve(&self, state: usize, mode: Mode) -> Option<Binding<C>> {
        let commands = &self.states[state].commands;
        commands[mode.index()].or(commands[Mode::Normal.index()])
    }

    pub fn feed(&mut self, mode: Mode, ev: KeyEvent) -> Feed<C> {
        match self.states[self.current].next.get(&ev) {
            Some(&next) => {
                let binding = self.resolve(next, mode);
                let has_children = !self.states[next].next.is_empty();
                match binding {
                    Some(b) if !has_children => {
                        self.reset();
                        trace!(?ev, "sequence resolved");
                        Feed::Command(b.command)
                    }
                    Some(b) => {
                        self.current = next;
                        self.pending_terminal = Some(b);
                        Feed::Pending
                    }
                    None => {
                        // Extending past a held terminal discards it.
                        self.current = next;
                        self.pending_terminal = None;
                        Feed::Pending
                    }
                }
            }
            None => {
                if self.current == 0 {
                    return Feed::Unmapped(ev);
                }
                let resolved = self.pending_terminal.take().map(|b| b.command);
                self.reset();
                Feed::Broken { resolved, retry: ev }
            }
        }
    }

    /// Resolve a held terminal prefix (sequence timeout or end of input).
    pub fn flush(&mut self) -> Option<C> {
        let resolved = self.pending_terminal.take().map(|b| b.command);
        self.reset();
        resolved
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.pending_terminal = None;
    }

    pub fn is_pending(&self) -> bool {
        self.current != 0
    }
}

impl<C: Copy> Default for Keymap<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "fsm_tests.rs"]
mod tests;
