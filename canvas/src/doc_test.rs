#![allow(clippy::float_cmp)]

use time::Duration;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn t0() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH + Duration::days(20_000)
}

fn make_note_at(created_at: OffsetDateTime) -> Note {
    Note::from_new(Uuid::new_v4(), "owner-1", NewNote::default(), created_at)
}

fn make_note() -> Note {
    make_note_at(t0())
}

// =============================================================
// NoteColor / NoteSettings
// =============================================================

#[test]
fn color_default_is_yellow() {
    assert_eq!(NoteColor::default(), NoteColor::Yellow);
}

#[test]
fn color_serializes_lowercase() {
    for color in NoteColor::ALL {
        let json = serde_json::to_value(color).unwrap();
        assert_eq!(json, serde_json::json!(color.as_str()));
    }
}

#[test]
fn settings_use_camel_case_key() {
    let json = serde_json::to_value(NoteSettings::with_color(NoteColor::Pink)).unwrap();
    assert_eq!(json, serde_json::json!({ "backgroundColor": "pink" }));
}

// =============================================================
// NewNote
// =============================================================

#[test]
fn new_note_defaults() {
    let input = NewNote::default();
    assert_eq!(input.title, "");
    assert_eq!(input.content, "");
    assert_eq!(input.settings.background_color, NoteColor::Yellow);
    assert_eq!(input.width, 350.0);
    assert_eq!(input.height, 300.0);
    assert_eq!(input.z_index, 1);
}

#[test]
fn new_note_at_uses_toolbar_defaults() {
    let input = NewNote::at(Point::new(12.5, -40.0));
    assert_eq!(input.title, "New Note");
    assert_eq!(input.content, "Click here to edit...");
    assert_eq!((input.x, input.y), (12.5, -40.0));
    assert_eq!((input.width, input.height), (300.0, 200.0));
    assert_eq!(input.z_index, 1);
    assert_eq!(input.settings.background_color, NoteColor::Yellow);
}

#[test]
fn from_new_copies_every_field() {
    let input = NewNote {
        title: "t".into(),
        content: "c".into(),
        settings: NoteSettings::with_color(NoteColor::Blue),
        x: 100.0,
        y: 200.0,
        width: 300.0,
        height: 200.0,
        z_index: 4,
    };
    let id = Uuid::new_v4();
    let note = Note::from_new(id, "u", input, t0());
    assert_eq!(note.id, id);
    assert_eq!(note.owner_id, "u");
    assert_eq!(note.position(), Point::new(100.0, 200.0));
    assert_eq!(note.size(), Size::new(300.0, 200.0));
    assert_eq!(note.color(), NoteColor::Blue);
    assert_eq!(note.z_index, 4);
    assert_eq!(note.created_at, note.updated_at);
}

// =============================================================
// NoteUpdate / merge
// =============================================================

#[test]
fn update_constructors_set_only_their_fields() {
    assert_eq!(NoteUpdate::position(1.0, 2.0), NoteUpdate { x: Some(1.0), y: Some(2.0), ..Default::default() });
    assert_eq!(
        NoteUpdate::size(300.0, 400.0),
        NoteUpdate { width: Some(300.0), height: Some(400.0), ..Default::default() }
    );
    assert_eq!(NoteUpdate::color(NoteColor::Green).settings, Some(NoteSettings::with_color(NoteColor::Green)));
    assert!(NoteUpdate::default().is_empty());
    assert!(!NoteUpdate::text(Some("x".into()), None).is_empty());
}

#[test]
fn merge_leaves_absent_fields_untouched() {
    let mut note = make_note();
    note.title = "keep".into();
    note.merge(&NoteUpdate::text(None, Some("body".into())));
    assert_eq!(note.title, "keep");
    assert_eq!(note.content, "body");
    assert_eq!(note.width, 350.0);
}

#[test]
fn update_serialization_skips_absent_fields() {
    let json = serde_json::to_value(NoteUpdate::position(5.0, 6.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 5.0, "y": 6.0 }));
}

#[test]
fn note_serde_round_trip() {
    let note = make_note();
    let json = serde_json::to_string(&note).unwrap();
    let restored: Note = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, note);
}

// =============================================================
// NoteStore: insert / get / remove
// =============================================================

#[test]
fn store_new_is_empty() {
    let store = NoteStore::new();
    assert!(store.is_empty());
    assert!(!store.has_pending());
}

#[test]
fn insert_adds_and_marks_pending() {
    let mut store = NoteStore::new();
    let note = make_note();
    let id = note.id;
    store.insert(note);
    assert_eq!(store.len(), 1);
    assert!(store.contains(&id));
    assert!(store.is_pending(&id));
}

#[test]
fn insert_appends_in_order() {
    let mut store = NoteStore::new();
    let a = make_note();
    let b = make_note();
    let (ida, idb) = (a.id, b.id);
    store.insert(a);
    store.insert(b);
    let ids: Vec<NoteId> = store.notes().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![ida, idb]);
}

#[test]
fn insert_same_id_replaces() {
    let mut store = NoteStore::new();
    let mut note = make_note();
    store.insert(note.clone());
    note.title = "second".into();
    store.insert(note.clone());
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&note.id).unwrap().title, "second");
}

#[test]
fn remove_deletes_note_and_pending_mark() {
    let mut store = NoteStore::new();
    let note = make_note();
    let id = note.id;
    store.insert(note);
    assert!(store.remove(&id).is_some());
    assert!(store.is_empty());
    assert!(!store.is_pending(&id));
}

#[test]
fn remove_missing_is_noop() {
    let mut store = NoteStore::new();
    store.insert(make_note());
    assert!(store.remove(&Uuid::new_v4()).is_none());
    assert_eq!(store.len(), 1);
}

// =============================================================
// NoteStore: apply
// =============================================================

#[test]
fn apply_merges_bumps_timestamp_and_marks_pending() {
    let mut store = NoteStore::new();
    let note = make_note();
    let id = note.id;
    store.insert(note);
    store.take_pending();

    let later = t0() + Duration::minutes(5);
    assert!(store.apply(&id, &NoteUpdate::position(10.0, 20.0), later));

    let note = store.get(&id).unwrap();
    assert_eq!(note.position(), Point::new(10.0, 20.0));
    assert_eq!(note.updated_at, later);
    assert_eq!(note.created_at, t0());
    assert!(store.is_pending(&id));
}

#[test]
fn apply_missing_returns_false() {
    let mut store = NoteStore::new();
    assert!(!store.apply(&Uuid::new_v4(), &NoteUpdate::color(NoteColor::Pink), t0()));
    assert!(!store.has_pending());
}

#[test]
fn repeated_apply_is_last_write_wins_per_field() {
    let mut store = NoteStore::new();
    let note = make_note();
    let id = note.id;
    store.insert(note);
    store.apply(&id, &NoteUpdate::position(1.0, 1.0), t0());
    store.apply(&id, &NoteUpdate::color(NoteColor::Purple), t0());
    store.apply(&id, &NoteUpdate::position(7.0, 8.0), t0());

    let note = store.get(&id).unwrap();
    assert_eq!(note.position(), Point::new(7.0, 8.0));
    assert_eq!(note.color(), NoteColor::Purple);
    assert_eq!(store.pending_len(), 1);
}

// =============================================================
// NoteStore: pending set
// =============================================================

#[test]
fn take_pending_snapshots_and_clears() {
    let mut store = NoteStore::new();
    let a = make_note();
    let b = make_note();
    let ida = a.id;
    store.insert(a);
    store.insert(b);
    store.take_pending();
    store.apply(&ida, &NoteUpdate::size(400.0, 400.0), t0());

    let flushed = store.take_pending();
    assert_eq!(flushed.len(), 1);
    assert_eq!(flushed[0].id, ida);
    assert_eq!(flushed[0].width, 400.0);
    assert!(!store.has_pending());
}

#[test]
fn mark_pending_requires_existing_note() {
    let mut store = NoteStore::new();
    let note = make_note();
    let id = note.id;
    store.insert(note);
    store.take_pending();
    assert!(store.mark_pending(&id));
    assert!(store.is_pending(&id));
    assert!(!store.mark_pending(&Uuid::new_v4()));
    assert_eq!(store.pending_len(), 1);
}

// =============================================================
// NoteStore: replace_all / ordering
// =============================================================

#[test]
fn replace_all_orders_newest_first_and_clears_pending() {
    let mut store = NoteStore::new();
    store.insert(make_note());

    let old = make_note_at(t0());
    let mid = make_note_at(t0() + Duration::hours(1));
    let new = make_note_at(t0() + Duration::hours(2));
    let expected = vec![new.id, mid.id, old.id];
    store.replace_all(vec![mid, old, new]);

    let ids: Vec<NoteId> = store.notes().iter().map(|n| n.id).collect();
    assert_eq!(ids, expected);
    assert!(!store.has_pending());
}

#[test]
fn clear_empties_everything() {
    let mut store = NoteStore::new();
    store.insert(make_note());
    store.clear();
    assert!(store.is_empty());
    assert!(!store.has_pending());
}

#[test]
fn sorted_by_z_orders_by_z_then_creation() {
    let mut store = NoteStore::new();
    let mut top = make_note_at(t0());
    top.z_index = 5;
    let first = make_note_at(t0());
    let second = make_note_at(t0() + Duration::seconds(1));
    let expected = vec![first.id, second.id, top.id];
    store.insert(top);
    store.insert(second);
    store.insert(first);

    let ids: Vec<NoteId> = store.sorted_by_z().iter().map(|n| n.id).collect();
    assert_eq!(ids, expected);
}
