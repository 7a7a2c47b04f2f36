//! Core types and data structures for WAR
//!
//! This crate provides the fundamental building blocks used throughout
//! the WAR implementation, including:
//! - The beat/column/frame time grid
//! - Pitch and tuning math
//! - Note records and the note store
//! - Layer masks
//! - Error types

pub mod error;
pub mod grid;
pub mod layer;
pub mod note;
pub mod pitch;
pub mod store;
pub mod transport;

pub use error::{Error, Result};
pub use grid::TimeGrid;
pub use layer::LayerMask;
pub use note::{CellFraction, Note, NoteCell, NoteId};
pub use pitch::{Pitch, Tuning, MAX_MIDI_NOTES};
pub use store::NoteStore;
pub use transport::TransportRequest;
