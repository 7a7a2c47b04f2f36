//! The editor command set
//!
//! One variant per bound operation. Commands are what the keymap resolves
//! to and what the dispatcher in [`crate::editor`] consumes; they carry no
//! state beyond their small payloads.

use serde::{Deserialize, Serialize};

/// Which notes a scoped operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// Notes intersecting the viewport.
    InView,
    /// Notes entirely outside the viewport.
    OutsideView,
    /// The contiguous run of notes around the cursor on its row.
    InWord,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Numeric prefix digit (1-9; a prefix in progress also accepts 0).
    Digit(u8),

    // Cursor motions
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    LeapUp,
    LeapDown,
    LeapLeft,
    LeapRight,
    HalfViewUp,
    HalfViewDown,
    GotoLeftBound,
    GotoRightBound,
    GotoTop,
    GotoBottom,
    GotoMiddle,
    GotoPlayBar,
    NextNoteStart,
    NextNoteEnd,
    PrevNoteStart,

    // Zoom
    ZoomIn,
    ZoomOut,
    ZoomInLeap,
    ZoomOutLeap,
    ZoomReset,

    // Cursor geometry (consume the numeric prefix as the new value)
    CursorWidthWhole,
    CursorWidthNumer,
    CursorWidthDenom,
    NavSubCellsCol,
    NavWholeCol,

    // Note edits
    NoteDraw,
    NoteDelete,
    DeleteScope(Scope),
    HideScope(Scope),
    ShowScope(Scope),
    MuteScope(Scope),
    UnmuteScope(Scope),
    GainUp,
    GainDown,

    // Layers
    LayerSelect(u8),
    LayerToggle(u8),
    LayerAll,

    // Transport
    TogglePlay,
    PlayFromCursor,
    PlayFromLeftBound,
    PlayFromBeginning,
    Stop,

    // HUD / cursor display
    CursorBlinkCycle,
    HudCycle,

    // History
    Undo,
    Redo,
    /// Redo down the next-older branch instead of the newest one.
    RedoAlt,

    // Views
    ViewsSave,
    ViewsMode,
    ViewsUp,
    ViewsDown,
    ViewsRecallSelected,
    ViewsRecall(u8),
    ViewsDelete,

    // Midi capture mode
    MidiMode,
    CaptureMonitorToggle,
    PlayGainUp,
    PlayGainDown,
    CaptureGainUp,
    CaptureGainDown,
    RecordOctave(i8),
    /// Semitone offset within the record octave.
    MappedNote(u8),

    // Mode switches
    EnterCommandMode,
    EnterVisual,
    EnterVisualLine,
    EnterVisualBlock,
    EscapeReset,
}
