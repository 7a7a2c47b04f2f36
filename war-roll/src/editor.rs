//! Command dispatch
//!
//! `Editor::apply` is the single entry point that turns a decoded
//! [`Command`] into state changes: it owns the roll state, the note store,
//! the undo tree and the saved views. Playback is not performed here;
//! transport commands surface as [`TransportRequest`] values for the audio
//! engine to consume.

use std::f64::consts::TAU;

use tracing::debug;
use war_core::{
    LayerMask, Note, NoteCell, NoteId, NoteStore, Pitch, Result, TimeGrid, TransportRequest,
    Tuning,
};
use war_keymap::Mode;

use crate::command::{Command, Scope};
use crate::state::RollState;
use crate::undo::{EditOp, UndoTree};
use crate::views::Views;

/// Per-project constants the dispatcher needs but the config crate owns.
#[derive(Debug, Clone)]
pub struct EditorOptions {
    pub note_capacity: usize,
    pub default_attack: f32,
    pub default_sustain: f32,
    pub default_release: f32,
    pub leap_increment: u32,
    /// How many view slots can be saved.
    pub views_saved: usize,
    /// One color per selectable layer.
    pub layer_colors: [u32; 9],
    /// Cursor color when several layers are active.
    pub multi_layer_color: u32,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            note_capacity: 100_000,
            default_attack: 0.005,
            default_sustain: 0.8,
            default_release: 0.05,
            leap_increment: 4,
            views_saved: crate::views::MAX_VIEWS,
            layer_colors: [
                0xff4363d8, 0xffe6194b, 0xff3cb44b, 0xffffe119, 0xfff58231, 0xff911eb4,
                0xff46f0f0, 0xfff032e6, 0xffbcf60c,
            ],
            multi_layer_color: 0xffffffff,
        }
    }
}

/// What a dispatched command asked of the world outside the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Applied {
    pub transport: Option<TransportRequest>,
    pub quit: bool,
}

impl Applied {
    fn none() -> Self {
        Self::default()
    }

    fn transport(req: TransportRequest) -> Self {
        Self {
            transport: Some(req),
            quit: false,
        }
    }
}

/// Word motions treat note boundaries on the cursor row like word edges.
#[derive(Debug, Clone, Copy)]
enum WordMotion {
    NextStart,
    NextEnd,
    PrevStart,
}

pub struct Editor {
    pub state: RollState,
    pub store: NoteStore,
    pub undo: UndoTree,
    pub views: Views,
    pub grid: TimeGrid,
    pub tuning: Tuning,
    pub options: EditorOptions,
}

impl Editor {
    pub fn new(grid: TimeGrid, tuning: Tuning, options: EditorOptions) -> Self {
        Self {
            state: RollState::default(),
            store: NoteStore::new(options.note_capacity),
            undo: UndoTree::new(),
            views: Views::with_capacity(options.views_saved),
            grid,
            tuning,
            options,
        }
    }

    /// Color the cursor should take for the active layer mask: the layer
    /// color when exactly one layer is active, white otherwise.
    pub fn cursor_color(&self) -> u32 {
        if self.state.layers.active_count() == 1 {
            let idx = self.state.layers.lowest().unwrap_or(0) as usize;
            self.options.layer_colors[idx % self.options.layer_colors.len()]
        } else {
            self.options.multi_layer_color
        }
    }

    pub fn apply(&mut self, cmd: Command) -> Result<Applied> {
        if let Command::Digit(d) = cmd {
            self.state.push_digit(d);
            return Ok(Applied::none());
        }
        // `0` is the left-bound motion, except while a prefix is in progress.
        if cmd == Command::GotoLeftBound && self.state.numeric_prefix.is_some() {
            self.state.push_digit(0);
            return Ok(Applied::none());
        }

        let applied = self.dispatch(cmd)?;
        // Every non-digit command consumes the prefix, used or not.
        self.state.numeric_prefix = None;
        let (col, row) = (self.state.cursor.col, self.state.cursor.row);
        self.state.viewport.ensure_visible(col, row);
        Ok(applied)
    }

    fn dispatch(&mut self, cmd: Command) -> Result<Applied> {
        let max_col = self.state.viewport.max_col;
        let max_row = self.state.viewport.max_row;
        match cmd {
            Command::Digit(_) => unreachable!("digits handled in apply"),

            Command::CursorUp => {
                let n = self.state.take_prefix();
                self.state.cursor.step_up(n, max_row);
            }
            Command::CursorDown => {
                let n = self.state.take_prefix();
                self.state.cursor.step_down(n);
            }
            Command::CursorLeft => {
                let n = self.state.take_prefix();
                self.state.cursor.step_left(n);
            }
            Command::CursorRight => {
                let n = self.state.take_prefix();
                self.state.cursor.step_right(n, max_col);
            }
            Command::LeapUp => {
                let n = self.state.take_prefix() * self.options.leap_increment;
                self.state.cursor.step_up(n, max_row);
            }
            Command::LeapDown => {
                let n = self.state.take_prefix() * self.options.leap_increment;
                self.state.cursor.step_down(n);
            }
            Command::LeapLeft => {
                let n = self.state.take_prefix() * self.options.leap_increment;
                self.state.cursor.step_left(n);
            }
            Command::LeapRight => {
                let n = self.state.take_prefix() * self.options.leap_increment;
                self.state.cursor.step_right(n, max_col);
            }
            Command::HalfViewUp => {
                let n = self.state.take_prefix() * (self.state.viewport.row_span() / 2).max(1);
                self.state.cursor.step_up(n, max_row);
            }
            Command::HalfViewDown => {
                let n = self.state.take_prefix() * (self.state.viewport.row_span() / 2).max(1);
                self.state.cursor.step_down(n);
            }
            Command::GotoLeftBound => {
                self.state.cursor.col = self.state.viewport.left_col;
                self.state.cursor.sub_col = 0;
            }
            Command::GotoRightBound => {
                self.state.cursor.col = self.state.viewport.right_col;
                self.state.cursor.sub_col = 0;
            }
            Command::GotoTop => self.state.cursor.row = max_row,
            Command::GotoBottom => self.state.cursor.row = 0,
            Command::GotoMiddle => self.state.cursor.row = self.state.viewport.middle_row(),
            Command::GotoPlayBar => {
                let col = self.state.play_head_col;
                self.state.cursor.set_col_f64(col, max_col);
            }
            Command::NextNoteStart => self.word_motion(WordMotion::NextStart),
            Command::NextNoteEnd => self.word_motion(WordMotion::NextEnd),
            Command::PrevNoteStart => self.word_motion(WordMotion::PrevStart),

            Command::ZoomIn => self.state.viewport.zoom_in(),
            Command::ZoomOut => self.state.viewport.zoom_out(),
            Command::ZoomInLeap => self.state.viewport.zoom_in_leap(),
            Command::ZoomOutLeap => self.state.viewport.zoom_out_leap(),
            Command::ZoomReset => self.state.viewport.zoom_reset(),

            Command::CursorWidthWhole => {
                self.state.cursor.width.whole = self.state.take_prefix();
            }
            Command::CursorWidthNumer => {
                let n = self.state.numeric_prefix.take().unwrap_or(0);
                self.state.cursor.width.numer = n;
            }
            Command::CursorWidthDenom => {
                self.state.cursor.width.denom = self.state.take_prefix();
            }
            Command::NavSubCellsCol => {
                let n = self.state.take_prefix();
                self.state.cursor.set_nav_sub_cells(n, max_col);
            }
            Command::NavWholeCol => {
                self.state.cursor.nav_whole_col = self.state.take_prefix();
            }

            Command::NoteDraw => {
                let n = self.state.take_prefix();
                self.draw_notes(n, self.state.cursor.row)?;
            }
            Command::NoteDelete => {
                if self.state.mode.is_visual() {
                    self.delete_visual_selection();
                } else {
                    let n = self.state.take_prefix();
                    self.delete_at_cursor(n);
                }
            }
            Command::DeleteScope(scope) => {
                let ids = self.scope_ids(scope);
                self.delete_ids(&ids);
            }
            Command::HideScope(scope) => self.set_hidden(scope, true),
            Command::ShowScope(scope) => self.set_hidden(scope, false),
            Command::MuteScope(scope) => self.set_muted(scope, true),
            Command::UnmuteScope(scope) => self.set_muted(scope, false),
            Command::GainUp => self.adjust_note_gain(self.state.gain_increment),
            Command::GainDown => self.adjust_note_gain(-self.state.gain_increment),

            Command::LayerSelect(idx) => {
                if idx < self.state.layer_count {
                    self.state.layers = LayerMask::only(u32::from(idx));
                }
            }
            Command::LayerToggle(idx) => {
                if idx < self.state.layer_count {
                    self.state.layers.toggle(u32::from(idx));
                }
            }
            Command::LayerAll => {
                self.state.layers = LayerMask::all(u32::from(self.state.layer_count));
            }

            Command::TogglePlay => return Ok(Applied::transport(TransportRequest::TogglePlay)),
            Command::PlayFromCursor => {
                let frames = self.grid.col_to_frames(self.state.cursor.col_f64());
                return Ok(Applied::transport(TransportRequest::PlayFrom(frames)));
            }
            Command::PlayFromLeftBound => {
                let frames = self.grid.col_to_frames(self.state.viewport.left_col as f64);
                return Ok(Applied::transport(TransportRequest::PlayFrom(frames)));
            }
            Command::PlayFromBeginning => {
                return Ok(Applied::transport(TransportRequest::PlayFrom(0)));
            }
            Command::Stop => return Ok(Applied::transport(TransportRequest::Stop)),

            Command::CursorBlinkCycle => self.state.blink = self.state.blink.cycle(),
            Command::HudCycle => self.state.hud = self.state.hud.cycle(),

            Command::Undo => {
                let n = self.state.take_prefix();
                for _ in 0..n {
                    if !self.undo.undo(&mut self.store)? {
                        break;
                    }
                }
            }
            Command::Redo => {
                let n = self.state.take_prefix();
                for _ in 0..n {
                    if !self.undo.redo(&mut self.store)? {
                        break;
                    }
                }
            }
            Command::RedoAlt => {
                let n = self.state.take_prefix();
                for _ in 0..n {
                    if !self.undo.redo_alt(&mut self.store)? {
                        break;
                    }
                }
            }

            Command::ViewsSave => {
                self.views.save(self.state.cursor, self.state.viewport);
            }
            Command::ViewsMode => self.state.mode = Mode::Views,
            Command::ViewsUp => self.views.select_up(),
            Command::ViewsDown => self.views.select_down(),
            Command::ViewsRecallSelected => {
                if let Some(slot) = self.views.recall_selected() {
                    self.state.cursor = slot.cursor;
                    self.state.viewport = slot.viewport;
                }
                self.state.mode = Mode::Normal;
            }
            Command::ViewsRecall(idx) => {
                if let Some(slot) = self.views.recall(idx as usize) {
                    self.state.cursor = slot.cursor;
                    self.state.viewport = slot.viewport;
                    self.state.mode = Mode::Normal;
                }
            }
            Command::ViewsDelete => self.views.delete_selected(),

            Command::MidiMode => self.state.mode = Mode::Midi,
            Command::CaptureMonitorToggle => {
                self.state.capture_monitor = !self.state.capture_monitor;
            }
            Command::PlayGainUp => {
                self.state.play_gain =
                    (self.state.play_gain + self.state.gain_increment).clamp(0.0, 1.0);
            }
            Command::PlayGainDown => {
                self.state.play_gain =
                    (self.state.play_gain - self.state.gain_increment).clamp(0.0, 1.0);
            }
            Command::CaptureGainUp => {
                self.state.capture_gain =
                    (self.state.capture_gain + self.state.gain_increment).clamp(0.0, 1.0);
            }
            Command::CaptureGainDown => {
                self.state.capture_gain =
                    (self.state.capture_gain - self.state.gain_increment).clamp(0.0, 1.0);
            }
            Command::RecordOctave(oct) => {
                self.state.record_octave = oct.clamp(-1, 9);
            }
            Command::MappedNote(degree) => self.record_mapped_note(degree)?,

            Command::EnterCommandMode => {
                self.state.mode = Mode::Command;
                self.state.cmdline.clear();
            }
            Command::EnterVisual => self.enter_visual(Mode::Visual),
            Command::EnterVisualLine => self.enter_visual(Mode::VisualLine),
            Command::EnterVisualBlock => self.enter_visual(Mode::VisualBlock),
            Command::EscapeReset => {
                self.state.mode = Mode::Normal;
                self.state.visual_anchor = None;
                self.state.cmdline.clear();
            }
        }
        Ok(Applied::none())
    }

    fn enter_visual(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.state.visual_anchor = Some((self.state.cursor.col, self.state.cursor.row));
    }

    /// Build a note + cell pair at a fractional column on a row, using the
    /// cursor width and current layer.
    fn make_note(&mut self, col: f64, row: u32) -> (Note, NoteCell) {
        let id = self.store.next_id();
        let layer = self.state.layers.lowest().unwrap_or(0);
        let width = self.state.cursor.width;
        let start_frames = self.grid.col_to_frames(col);
        let end_frames = self.grid.col_to_frames(col + width.as_f64());
        let pitch = Pitch(row.min(127) as u8);
        let frequency = pitch.frequency(&self.tuning);
        let note = Note {
            id,
            start_frames,
            duration_frames: end_frames.saturating_sub(start_frames),
            pitch,
            layer,
            gain: 1.0,
            attack: self.options.default_attack,
            sustain: self.options.default_sustain,
            release: self.options.default_release,
            phase_increment: (TAU * frequency / self.grid.sample_rate as f64) as f32,
        };
        let color = self.options.layer_colors[layer as usize % self.options.layer_colors.len()];
        let cell = NoteCell {
            id,
            col,
            row,
            layer,
            width,
            color,
            outline_color: self.options.multi_layer_color,
            gain: 1.0,
            voice: 0,
            hidden: false,
            muted: false,
        };
        (note, cell)
    }

    /// Draw `count` contiguous notes starting at the cursor, advancing the
    /// cursor past each. One undo node regardless of count.
    fn draw_notes(&mut self, count: u32, row: u32) -> Result<()> {
        let max_col = self.state.viewport.max_col;
        let mut added = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let col = self.state.cursor.col_f64();
            let (note, cell) = self.make_note(col, row);
            self.store.insert(note, cell)?;
            added.push((note, cell));
            let width = self.state.cursor.width.as_f64();
            self.state.cursor.set_col_f64(col + width, max_col);
        }
        debug!(count = added.len(), row, "notes drawn");
        match added.len() {
            0 => {}
            1 => self.undo.record(EditOp::AddNote(added[0].0, added[0].1)),
            _ => self.undo.record(EditOp::AddNotes(added)),
        }
        Ok(())
    }

    fn delete_at_cursor(&mut self, count: u32) {
        let mut killed = Vec::new();
        for _ in 0..count {
            let col = self.state.cursor.col_f64();
            let row = self.state.cursor.row;
            let Some(id) = self.store.at_cell(col, row) else {
                break;
            };
            if let Some(pair) = self.store.kill(id) {
                killed.push(pair);
            }
        }
        self.record_deletes(killed);
    }

    fn delete_visual_selection(&mut self) {
        let Some((anchor_col, anchor_row)) = self.state.visual_anchor.take() else {
            return;
        };
        let cur = self.state.cursor;
        let (left, right) = if anchor_col <= cur.col {
            (anchor_col as f64, cur.col as f64 + 1.0)
        } else {
            (cur.col as f64, anchor_col as f64 + 1.0)
        };
        let (bottom, top) = if anchor_row <= cur.row {
            (anchor_row, cur.row)
        } else {
            (cur.row, anchor_row)
        };
        let ids = match self.state.mode {
            // Line selection spans all columns of the selected rows.
            Mode::VisualLine => {
                self.store
                    .in_region(0.0, self.state.viewport.max_col as f64 + 1.0, bottom, top)
            }
            _ => self.store.in_region(left, right, bottom, top),
        };
        self.delete_ids(&ids);
        self.state.mode = Mode::Normal;
    }

    fn delete_ids(&mut self, ids: &[NoteId]) {
        let mut killed = Vec::with_capacity(ids.len());
        for &id in ids {
            if let Some(pair) = self.store.kill(id) {
                killed.push(pair);
            }
        }
        self.record_deletes(killed);
    }

    fn record_deletes(&mut self, killed: Vec<(Note, NoteCell)>) {
        debug!(count = killed.len(), "notes deleted");
        match killed.len() {
            0 => {}
            1 => self.undo.record(EditOp::DeleteNote(killed[0].0, killed[0].1)),
            _ => self.undo.record(EditOp::DeleteNotes(killed)),
        }
    }

    /// Note ids selected by a scope operator.
    fn scope_ids(&self, scope: Scope) -> Vec<NoteId> {
        let vp = self.state.viewport;
        match scope {
            Scope::All => self.store.all_ids(),
            Scope::InView => self.store.in_region(
                vp.left_col as f64,
                vp.right_col as f64 + 1.0,
                vp.bottom_row,
                vp.top_row,
            ),
            Scope::OutsideView => {
                let in_view = self.store.in_region(
                    vp.left_col as f64,
                    vp.right_col as f64 + 1.0,
                    vp.bottom_row,
                    vp.top_row,
                );
                self.store
                    .all_ids()
                    .into_iter()
                    .filter(|id| !in_view.contains(id))
                    .collect()
            }
            Scope::InWord => self.word_ids(),
        }
    }

    /// The contiguous run of touching notes around the cursor on its row.
    fn word_ids(&self) -> Vec<NoteId> {
        let row = self.state.cursor.row;
        let col = self.state.cursor.col_f64();
        let cells = self.store.on_row(row);
        let Some(start) = cells.iter().position(|c| c.covers(col, row)) else {
            return Vec::new();
        };
        let mut lo = start;
        while lo > 0 && cells[lo - 1].end_col() >= cells[lo].col {
            lo -= 1;
        }
        let mut hi = start;
        while hi + 1 < cells.len() && cells[hi].end_col() >= cells[hi + 1].col {
            hi += 1;
        }
        cells[lo..=hi].iter().map(|c| c.id).collect()
    }

    fn set_hidden(&mut self, scope: Scope, hidden: bool) {
        for id in self.scope_ids(scope) {
            if let Some(cell) = self.store.cell_mut(id) {
                cell.hidden = hidden;
            }
        }
    }

    fn set_muted(&mut self, scope: Scope, muted: bool) {
        for id in self.scope_ids(scope) {
            if let Some(cell) = self.store.cell_mut(id) {
                cell.muted = muted;
            }
        }
    }

    fn adjust_note_gain(&mut self, delta: f32) {
        let col = self.state.cursor.col_f64();
        let row = self.state.cursor.row;
        if let Some(id) = self.store.at_cell(col, row) {
            if let Some((note, cell)) = self.store.note_mut(id) {
                note.gain = (note.gain + delta).clamp(0.0, 1.0);
                cell.gain = note.gain;
            }
        }
    }

    fn word_motion(&mut self, motion: WordMotion) {
        let row = self.state.cursor.row;
        let col = self.state.cursor.col_f64();
        let max_col = self.state.viewport.max_col;
        let cells = self.store.on_row(row);
        let target = match motion {
            WordMotion::NextStart => cells.iter().map(|c| c.col).find(|&c| c > col),
            WordMotion::NextEnd => cells.iter().map(|c| c.end_col()).find(|&c| c > col),
            WordMotion::PrevStart => cells
                .iter()
                .map(|c| c.col)
                .rev()
                .find(|&c| c < col),
        };
        if let Some(target) = target {
            self.state.cursor.set_col_f64(target, max_col);
        }
    }

    /// Record-mode note entry: `degree` is a semitone within the record
    /// octave. Out-of-range pitches are ignored.
    fn record_mapped_note(&mut self, degree: u8) -> Result<()> {
        let pitch = 12 * (i32::from(self.state.record_octave) + 1) + i32::from(degree);
        if !(0..=127).contains(&pitch) {
            return Ok(());
        }
        self.state.mapped_note = Some(pitch as u8);
        let row = pitch as u32;
        let saved_row = self.state.cursor.row;
        self.state.cursor.row = row;
        self.draw_notes(1, row)?;
        self.state.cursor.row = saved_row;
        Ok(())
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod tests;
