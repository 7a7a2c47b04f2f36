use super::*;
use crate::note::CellFraction;
use crate::pitch::Pitch;
use crate::LayerMask;

fn note_at(store: &mut NoteStore, col: f64, row: u32, layer: u32) -> NoteId {
    let id = store.next_id();
    let note = Note {
        id,
        start_frames: (col * 1000.0) as u64,
        duration_frames: 1000,
        pitch: Pitch(row as u8),
        layer,
        gain: 1.0,
        attack: 0.0,
        sustain: 1.0,
        release: 0.0,
        phase_increment: 0.0,
    };
    let cell = NoteCell {
        id,
        col,
        row,
        layer,
        width: CellFraction::whole(1),
        color: 0,
        outline_color: 0,
        gain: 1.0,
        voice: 0,
        hidden: false,
        muted: false,
    };
    store.insert(note, cell).unwrap()
}

#[test]
fn insert_kill_revive_keeps_id() {
    let mut store = NoteStore::new(64);
    let id = note_at(&mut store, 0.0, 60, 0);
    assert_eq!(store.alive_count(), 1);

    let (note, cell) = store.kill(id).unwrap();
    assert_eq!(store.alive_count(), 0);
    assert!(store.get(id).is_none());

    store.revive(note, cell).unwrap();
    assert_eq!(store.alive_count(), 1);
    assert_eq!(store.get(id).unwrap().0.id, id);
}

#[test]
fn revive_after_compaction_reinserts_payload() {
    let mut store = NoteStore::new(64);
    let id = note_at(&mut store, 0.0, 60, 0);
    let (note, cell) = store.kill(id).unwrap();
    store.compact();
    assert_eq!(store.alive_count(), 0);

    store.revive(note, cell).unwrap();
    let (got, _) = store.get(id).unwrap();
    assert_eq!(got.id, id);
    assert_eq!(got.start_frames, note.start_frames);
}

#[test]
fn compaction_preserves_order_and_ids() {
    let mut store = NoteStore::new(64);
    let a = note_at(&mut store, 0.0, 60, 0);
    let b = note_at(&mut store, 1.0, 61, 0);
    let c = note_at(&mut store, 2.0, 62, 0);
    store.kill(b).unwrap();
    store.compact();

    let ids: Vec<NoteId> = store.iter().map(|(n, _)| n.id).collect();
    assert_eq!(ids, vec![a, c]);

    // New ids keep counting up, never reusing b.
    let d = note_at(&mut store, 3.0, 63, 0);
    assert!(d.0 > c.0);
    assert_ne!(d, b);
}

#[test]
fn insert_compacts_before_reporting_full() {
    let mut store = NoteStore::new(4);
    let a = note_at(&mut store, 0.0, 60, 0);
    let b = note_at(&mut store, 1.0, 60, 0);
    let c = note_at(&mut store, 2.0, 60, 0);
    let d = note_at(&mut store, 3.0, 60, 0);
    store.kill(a).unwrap();
    // Capacity 4 holds 4 notes; the dead slot is reclaimed for the fifth.
    let e = note_at(&mut store, 4.0, 60, 0);
    assert_eq!(store.alive_count(), 4);
    for id in [b, c, d, e] {
        assert!(store.get(id).is_some());
    }

    // Now genuinely full.
    let id = store.next_id();
    let (note, cell) = {
        let (n, c) = store.get(b).unwrap();
        let mut n = *n;
        let mut c = *c;
        n.id = id;
        c.id = id;
        (n, c)
    };
    assert!(matches!(
        store.insert(note, cell),
        Err(Error::StoreFull { capacity: 4 })
    ));
}

#[test]
fn at_cell_prefers_higher_layer() {
    let mut store = NoteStore::new(64);
    let _low = note_at(&mut store, 0.0, 60, 0);
    let high = note_at(&mut store, 0.0, 60, 3);
    assert_eq!(store.at_cell(0.5, 60), Some(high));
    assert_eq!(store.at_cell(0.5, 61), None);
}

#[test]
fn region_query_is_half_open_in_columns() {
    let mut store = NoteStore::new(64);
    let a = note_at(&mut store, 0.0, 60, 0);
    let b = note_at(&mut store, 4.0, 62, 0);
    let hits = store.in_region(0.0, 4.0, 58, 64);
    assert!(hits.contains(&a));
    assert!(!hits.contains(&b));
    let hits = store.in_region(0.0, 4.5, 58, 64);
    assert!(hits.contains(&b));
}

#[test]
fn audible_skips_muted_and_unmasked() {
    let mut store = NoteStore::new(64);
    let a = note_at(&mut store, 0.0, 60, 0);
    let b = note_at(&mut store, 1.0, 60, 1);
    store.cell_mut(a).unwrap().muted = true;

    let audible = store.audible_notes(LayerMask::all(9));
    assert_eq!(audible.len(), 1);
    assert_eq!(audible[0].id, b);

    let audible = store.audible_notes(LayerMask::only(0));
    assert!(audible.is_empty());
}

#[test]
fn on_row_is_sorted_by_column() {
    let mut store = NoteStore::new(64);
    note_at(&mut store, 5.0, 60, 0);
    note_at(&mut store, 1.0, 60, 0);
    note_at(&mut store, 3.0, 61, 0);
    let cells = store.on_row(60);
    assert_eq!(cells.len(), 2);
    assert_eq!(cells[0].col, 1.0);
    assert_eq!(cells[1].col, 5.0);
}
