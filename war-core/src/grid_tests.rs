use super::*;

#[test]
fn frames_per_beat_at_default_rate() {
    let grid = TimeGrid::new(44_100, 100.0, 4.0);
    assert_eq!(grid.frames_per_beat(), 26_460.0);
}

#[test]
fn col_to_frames_rounds_half_up() {
    let grid = TimeGrid::new(44_100, 100.0, 4.0);
    // One column = one quarter beat = 6615 frames exactly.
    assert_eq!(grid.col_to_frames(1.0), 6_615);
    assert_eq!(grid.col_to_frames(4.0), 26_460);
    assert_eq!(grid.col_to_frames(0.0), 0);
}

#[test]
fn whole_columns_round_trip_when_frames_per_beat_is_integral() {
    // 60 bpm at 48kHz: frames_per_beat = 48000, frames_per_column = 12000.
    let grid = TimeGrid::new(48_000, 60.0, 4.0);
    for col in 0..64 {
        let frames = grid.col_to_frames(col as f64);
        assert_eq!(grid.frames_to_col(frames), col as f64);
    }
}

#[test]
fn fractional_columns_map_to_fractional_frames() {
    let grid = TimeGrid::new(48_000, 60.0, 4.0);
    assert_eq!(grid.col_to_frames(0.5), 6_000);
    assert_eq!(grid.col_to_frames(1.25), 15_000);
}

#[test]
fn frames_per_column_consistent() {
    let grid = TimeGrid::new(44_100, 120.0, 4.0);
    let per_col = grid.frames_per_column();
    assert!((per_col * 4.0 - grid.frames_per_beat()).abs() < 1e-9);
}
