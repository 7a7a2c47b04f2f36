//! Cursor position and fractional navigation
//!
//! The cursor sits on an integer cell plus a proper fraction of a cell, kept
//! as a numerator over the navigation denominator so repeated sub-cell steps
//! never drift. A motion advances by `increment * nav_whole / nav_sub_cells`
//! cells with exact carry of the fractional remainder.

use serde::{Deserialize, Serialize};
use war_core::CellFraction;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub col: u32,
    pub row: u32,
    /// Fractional column position, numerator over `nav_sub_cells_col`.
    pub sub_col: u32,
    /// Navigation step: `nav_whole_col / nav_sub_cells_col` columns.
    pub nav_whole_col: u32,
    pub nav_sub_cells_col: u32,
    /// Note width drawn by `NoteDraw`.
    pub width: CellFraction,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            col: 0,
            row: 60,
            sub_col: 0,
            nav_whole_col: 1,
            nav_sub_cells_col: 1,
            width: CellFraction::whole(1),
        }
    }
}

impl Cursor {
    /// Exact fractional column position.
    pub fn col_f64(&self) -> f64 {
        self.col as f64 + self.sub_col as f64 / self.nav_sub_cells_col.max(1) as f64
    }

    /// Step right by `count` navigation increments, clamped to `max_col`.
    pub fn step_right(&mut self, count: u32, max_col: u32) {
        let denom = self.nav_sub_cells_col.max(1) as u64;
        let total = self.col as u64 * denom + self.sub_col as u64;
        let delta = count as u64 * self.nav_whole_col as u64;
        let max_total = max_col as u64 * denom;
        let total = (total + delta).min(max_total);
        self.col = (total / denom) as u32;
        self.sub_col = (total % denom) as u32;
    }

    /// Step left by `count` navigation increments, clamped to column zero.
    pub fn step_left(&mut self, count: u32) {
        let denom = self.nav_sub_cells_col.max(1) as u64;
        let total = self.col as u64 * denom + self.sub_col as u64;
        let delta = count as u64 * self.nav_whole_col as u64;
        let total = total.saturating_sub(delta);
        self.col = (total / denom) as u32;
        self.sub_col = (total % denom) as u32;
    }

    pub fn step_up(&mut self, count: u32, max_row: u32) {
        self.row = self.row.saturating_add(count).min(max_row);
    }

    pub fn step_down(&mut self, count: u32) {
        self.row = self.row.saturating_sub(count);
    }

    /// Move to an exact fractional column, snapping the remainder onto the
    /// current navigation denominator.
    pub fn set_col_f64(&mut self, col: f64, max_col: u32) {
        let col = col.clamp(0.0, max_col as f64);
        let denom = self.nav_sub_cells_col.max(1);
        let whole = col.floor();
        self.col = whole as u32;
        self.sub_col = ((col - whole) * denom as f64).round() as u32;
        if self.sub_col >= denom {
            self.col = (self.col + 1).min(max_col);
            self.sub_col = 0;
        }
    }

    /// Change the navigation denominator, re-snapping the fractional part so
    /// the cursor does not jump.
    pub fn set_nav_sub_cells(&mut self, denom: u32, max_col: u32) {
        let pos = self.col_f64();
        self.nav_sub_cells_col = denom.max(1);
        self.set_col_f64(pos, max_col);
    }
}
