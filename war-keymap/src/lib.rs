//! Key events and the keymap finite state machine for WAR
//!
//! Input arrives as normalized `KeyEvent`s and runs through a compiled trie:
//! multi-key sequences walk intermediate states, terminal states resolve to a
//! per-mode command with Normal-mode fallback. Key sequences are written in
//! a compact vim-flavored notation (`gg`, `<space>div`, `<c-r>`).

pub mod fsm;
pub mod key;
pub mod mode;
pub mod notation;

pub use fsm::{Binding, Feed, Keymap};
pub use key::{Key, KeyEvent, Mods};
pub use mode::Mode;
pub use notation::parse_sequence;
