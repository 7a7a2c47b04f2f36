//! The viewport window over the roll grid
//!
//! Motions keep the cursor inside a scroll margin by shifting the window;
//! zoom recomputes the visible span from the physical size and clamps the
//! scale to [0.1, 5.0] with a minimum span of five cells either way.

use serde::{Deserialize, Serialize};
use war_core::MAX_MIDI_NOTES;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;
const MIN_SPAN: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left_col: u32,
    pub right_col: u32,
    pub bottom_row: u32,
    pub top_row: u32,
    pub max_col: u32,
    pub max_row: u32,
    pub scroll_margin_cols: u32,
    pub scroll_margin_rows: u32,
    pub zoom_scale: f32,
    pub zoom_increment: f32,
    pub zoom_leap_increment: f32,
    physical_width: f32,
    physical_height: f32,
    cell_width: f32,
    cell_height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        let mut vp = Self {
            left_col: 0,
            right_col: 0,
            bottom_row: 0,
            top_row: 0,
            max_col: 4096,
            max_row: u32::from(MAX_MIDI_NOTES) - 1,
            scroll_margin_cols: 4,
            scroll_margin_rows: 4,
            zoom_scale: 1.0,
            zoom_increment: 0.1,
            zoom_leap_increment: 0.5,
            physical_width: 1920.0,
            physical_height: 1080.0,
            cell_width: 24.0,
            cell_height: 24.0,
        };
        vp.recompute_spans();
        vp.bottom_row = 40;
        vp.top_row = (vp.bottom_row + vp.rows() - 1).min(vp.max_row);
        vp
    }
}

impl Viewport {
    pub fn cols(&self) -> u32 {
        let cols = self.physical_width / (self.cell_width * self.zoom_scale);
        (cols.round() as i64).max(MIN_SPAN as i64) as u32
    }

    pub fn rows(&self) -> u32 {
        let rows = self.physical_height / (self.cell_height * self.zoom_scale);
        (rows.round() as i64).max(MIN_SPAN as i64) as u32
    }

    fn recompute_spans(&mut self) {
        self.right_col = (self.left_col + self.cols() - 1).min(self.max_col);
        self.top_row = (self.bottom_row + self.rows() - 1).min(self.max_row);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(self.zoom_increment);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(-self.zoom_increment);
    }

    pub fn zoom_in_leap(&mut self) {
        self.zoom_by(self.zoom_leap_increment);
    }

    pub fn zoom_out_leap(&mut self) {
        self.zoom_by(-self.zoom_leap_increment);
    }

    fn zoom_by(&mut self, delta: f32) {
        self.zoom_scale = (self.zoom_scale + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        self.recompute_spans();
    }

    pub fn zoom_reset(&mut self) {
        self.zoom_scale = 1.0;
        self.recompute_spans();
    }

    /// Shift the window so `(col, row)` sits inside the scroll margins.
    /// The window span is preserved; shifts clamp at the grid edges.
    pub fn ensure_visible(&mut self, col: u32, row: u32) {
        let col_span = self.right_col - self.left_col;
        let row_span = self.top_row - self.bottom_row;
        let margin_cols = self.scroll_margin_cols.min(col_span / 2);
        let margin_rows = self.scroll_margin_rows.min(row_span / 2);

        if col > self.right_col.saturating_sub(margin_cols) {
            let target_right = (col + margin_cols).min(self.max_col);
            self.right_col = target_right.max(col_span);
            self.left_col = self.right_col - col_span;
        } else if col < self.left_col + margin_cols {
            self.left_col = col.saturating_sub(margin_cols);
            self.right_col = self.left_col + col_span;
        }

        if row > self.top_row.saturating_sub(margin_rows) {
            let target_top = (row + margin_rows).min(self.max_row);
            self.top_row = target_top.max(row_span);
            self.bottom_row = self.top_row - row_span;
        } else if row < self.bottom_row + margin_rows {
            self.bottom_row = row.saturating_sub(margin_rows);
            self.top_row = self.bottom_row + row_span;
        }
    }

    pub fn middle_row(&self) -> u32 {
        self.bottom_row + (self.top_row - self.bottom_row) / 2
    }

    pub fn col_span(&self) -> u32 {
        self.right_col - self.left_col
    }

    pub fn row_span(&self) -> u32 {
        self.top_row - self.bottom_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_clamps_scale() {
        let mut vp = Viewport::default();
        for _ in 0..100 {
            vp.zoom_in();
        }
        assert_eq!(vp.zoom_scale, MAX_ZOOM);
        for _ in 0..100 {
            vp.zoom_out();
        }
        assert!((vp.zoom_scale - MIN_ZOOM).abs() < 1e-6);
        // Fully zoomed out still shows at least the minimum span.
        assert!(vp.cols() >= MIN_SPAN);
    }

    #[test]
    fn zoom_reset_restores_unit_scale() {
        let mut vp = Viewport::default();
        vp.zoom_in_leap();
        vp.zoom_reset();
        assert_eq!(vp.zoom_scale, 1.0);
        assert_eq!(vp.right_col - vp.left_col + 1, vp.cols().min(vp.max_col + 1));
    }

    #[test]
    fn ensure_visible_scrolls_right_with_margin() {
        let mut vp = Viewport::default();
        let span = vp.col_span();
        vp.ensure_visible(vp.right_col + 10, vp.middle_row());
        assert_eq!(vp.col_span(), span);
        assert!(vp.right_col >= vp.left_col + span);
        assert!(vp.right_col - vp.scroll_margin_cols >= span);
    }

    #[test]
    fn ensure_visible_clamps_at_origin() {
        let mut vp = Viewport::default();
        vp.left_col = 50;
        vp.right_col = 50 + vp.col_span();
        let span = vp.col_span();
        vp.ensure_visible(0, vp.middle_row());
        assert_eq!(vp.left_col, 0);
        assert_eq!(vp.col_span(), span);
    }

    #[test]
    fn ensure_visible_ignores_cursor_inside_margins() {
        let mut vp = Viewport::default();
        let before = vp;
        vp.ensure_visible(vp.left_col + vp.col_span() / 2, vp.middle_row());
        assert_eq!(vp, before);
    }

    #[test]
    fn ensure_visible_scrolls_rows_both_ways() {
        let mut vp = Viewport::default();
        let span = vp.row_span();
        vp.ensure_visible(vp.left_col + 1, vp.max_row);
        assert_eq!(vp.top_row, vp.max_row);
        assert_eq!(vp.row_span(), span);
        vp.ensure_visible(vp.left_col + 1, 0);
        assert_eq!(vp.bottom_row, 0);
        assert_eq!(vp.row_span(), span);
    }
}
