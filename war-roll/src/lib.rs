//! The piano-roll editor engine for WAR
//!
//! Everything that happens between a decoded key command and the note store
//! lives here: cursor and viewport state, the command dispatcher, the
//! branching undo tree, saved views, the midi-capture key mapping, and
//! project persistence. The engine is headless; playback requests are
//! surfaced as [`war_core::TransportRequest`] values for the audio engine.

pub mod bindings;
pub mod command;
pub mod cursor;
pub mod editor;
pub mod project;
pub mod session;
pub mod state;
pub mod undo;
pub mod viewport;
pub mod views;

pub use bindings::default_keymap;
pub use command::{Command, Scope};
pub use cursor::Cursor;
pub use editor::{Applied, Editor, EditorOptions};
pub use project::Project;
pub use session::Session;
pub use state::{BlinkState, HudState, RollState};
pub use undo::{EditOp, UndoTree};
pub use viewport::Viewport;
pub use views::{ViewSlot, Views};
