use super::*;
use war_core::{CellFraction, NoteId, Pitch};

fn pair(store: &mut NoteStore, col: f64, row: u32) -> (Note, NoteCell) {
    let id = store.next_id();
    let note = Note {
        id,
        start_frames: (col * 1000.0) as u64,
        duration_frames: 1000,
        pitch: Pitch(row as u8),
        layer: 0,
        gain: 1.0,
        attack: 0.01,
        sustain: 0.8,
        release: 0.05,
        phase_increment: 0.0,
    };
    let cell = NoteCell {
        id,
        col,
        row,
        layer: 0,
        width: CellFraction::whole(1),
        color: 0xffffffff,
        outline_color: 0xff000000,
        gain: 1.0,
        voice: 0,
        hidden: false,
        muted: false,
    };
    (note, cell)
}

fn add(store: &mut NoteStore, tree: &mut UndoTree, col: f64, row: u32) -> NoteId {
    let (note, cell) = pair(store, col, row);
    let id = store.insert(note, cell).unwrap();
    tree.record(EditOp::AddNote(note, cell));
    id
}

#[test]
fn undo_redo_single_add() {
    let mut store = NoteStore::new(64);
    let mut tree = UndoTree::new();
    let id = add(&mut store, &mut tree, 0.0, 60);

    assert!(tree.undo(&mut store).unwrap());
    assert!(store.get(id).is_none());
    assert!(tree.redo(&mut store).unwrap());
    assert!(store.get(id).is_some());
}

#[test]
fn undo_at_root_and_redo_at_tip_are_noops() {
    let mut store = NoteStore::new(64);
    let mut tree = UndoTree::new();
    assert!(!tree.undo(&mut store).unwrap());
    assert!(!tree.redo(&mut store).unwrap());

    add(&mut store, &mut tree, 0.0, 60);
    assert!(!tree.redo(&mut store).unwrap());
}

#[test]
fn delete_op_reverts_to_revival() {
    let mut store = NoteStore::new(64);
    let mut tree = UndoTree::new();
    let id = add(&mut store, &mut tree, 2.0, 50);

    let (note, cell) = store.kill(id).unwrap();
    tree.record(EditOp::DeleteNote(note, cell));
    assert!(store.get(id).is_none());

    assert!(tree.undo(&mut store).unwrap());
    assert!(store.get(id).is_some());
    assert!(tree.redo(&mut store).unwrap());
    assert!(store.get(id).is_none());
}

#[test]
fn editing_after_undo_branches_and_redo_follows_newest() {
    let mut store = NoteStore::new(64);
    let mut tree = UndoTree::new();
    let a = add(&mut store, &mut tree, 0.0, 60);
    let b = add(&mut store, &mut tree, 1.0, 60);

    // Drop b, then take a different edit from the same point.
    assert!(tree.undo(&mut store).unwrap());
    let c = add(&mut store, &mut tree, 2.0, 60);
    assert!(store.get(b).is_none());
    assert!(store.get(c).is_some());

    // Walking back reaches the shared parent; redo prefers the new branch.
    assert!(tree.undo(&mut store).unwrap());
    assert!(store.get(c).is_none());
    assert!(store.get(a).is_some());
    assert!(tree.redo(&mut store).unwrap());
    assert!(store.get(c).is_some());
    assert!(store.get(b).is_none());
}

#[test]
fn old_branch_remains_reachable_through_root() {
    let mut store = NoteStore::new(64);
    let mut tree = UndoTree::new();
    let a = add(&mut store, &mut tree, 0.0, 60);
    assert!(tree.undo(&mut store).unwrap());
    let b = add(&mut store, &mut tree, 1.0, 60);

    // Two root branches now exist; redo from the pristine root takes the
    // newest one.
    assert!(tree.undo(&mut store).unwrap());
    assert!(store.get(a).is_none());
    assert!(store.get(b).is_none());
    assert!(tree.redo(&mut store).unwrap());
    assert!(store.get(b).is_some());
    assert!(store.get(a).is_none());
}

#[test]
fn redo_alt_takes_the_older_branch() {
    let mut store = NoteStore::new(64);
    let mut tree = UndoTree::new();
    let a = add(&mut store, &mut tree, 0.0, 60);
    assert!(tree.undo(&mut store).unwrap());
    let b = add(&mut store, &mut tree, 1.0, 60);
    assert!(tree.undo(&mut store).unwrap());

    // From the pristine root, redo would take b; the alternative is a.
    assert!(tree.redo_alt(&mut store).unwrap());
    assert!(store.get(a).is_some());
    assert!(store.get(b).is_none());

    // a has no second child to follow.
    assert!(!tree.redo_alt(&mut store).unwrap());
}

#[test]
fn redo_alt_without_a_second_branch_is_a_noop() {
    let mut store = NoteStore::new(64);
    let mut tree = UndoTree::new();
    assert!(!tree.redo_alt(&mut store).unwrap());

    let a = add(&mut store, &mut tree, 0.0, 60);
    assert!(tree.undo(&mut store).unwrap());
    // Only one branch exists; nothing alternative to redo.
    assert!(!tree.redo_alt(&mut store).unwrap());
    assert!(store.get(a).is_none());
}

#[test]
fn batch_ops_round_trip() {
    let mut store = NoteStore::new(64);
    let mut tree = UndoTree::new();
    let mut pairs = Vec::new();
    for i in 0..4 {
        let (n, c) = pair(&mut store, i as f64, 60);
        store.insert(n, c).unwrap();
        pairs.push((n, c));
    }
    tree.record(EditOp::AddNotes(pairs.clone()));
    assert_eq!(store.alive_count(), 4);

    assert!(tree.undo(&mut store).unwrap());
    assert_eq!(store.alive_count(), 0);
    assert!(tree.redo(&mut store).unwrap());
    assert_eq!(store.alive_count(), 4);
}
