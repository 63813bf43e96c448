#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::resize::ResizeDirection;

const EPSILON: f64 = 1e-9;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

fn setup() -> (NoteId, DragController, NoteView) {
    let id = Uuid::new_v4();
    (id, DragController::new(id), NoteView::new())
}

// =============================================================
// begin
// =============================================================

#[test]
fn begin_on_note_body_starts_drag() {
    let (id, mut drag, _) = setup();
    assert!(drag.begin(pt(120.0, 130.0), PointerTarget::Note(id), pt(100.0, 100.0), &Camera::default()));
    assert!(drag.is_active());
    assert_eq!(drag.grab_offset(), Some(pt(20.0, 30.0)));
}

#[test]
fn grab_offset_is_divided_by_zoom() {
    let (id, mut drag, _) = setup();
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 };
    drag.begin(pt(140.0, 160.0), PointerTarget::Note(id), pt(100.0, 100.0), &cam);
    assert_eq!(drag.grab_offset(), Some(pt(20.0, 30.0)));
}

#[test]
fn begin_on_text_field_is_ignored() {
    let (id, mut drag, _) = setup();
    assert!(!drag.begin(pt(0.0, 0.0), PointerTarget::NoteText(id), pt(0.0, 0.0), &Camera::default()));
    assert!(!drag.is_active());
}

#[test]
fn begin_on_other_targets_is_ignored() {
    let (id, mut drag, _) = setup();
    let cam = Camera::default();
    assert!(!drag.begin(pt(0.0, 0.0), PointerTarget::Background, pt(0.0, 0.0), &cam));
    assert!(!drag.begin(pt(0.0, 0.0), PointerTarget::Note(Uuid::new_v4()), pt(0.0, 0.0), &cam));
    assert!(!drag.begin(pt(0.0, 0.0), PointerTarget::ResizeHandle(id, ResizeDirection::Right), pt(0.0, 0.0), &cam));
    assert!(!drag.is_active());
}

#[test]
fn second_begin_while_active_is_ignored() {
    let (id, mut drag, _) = setup();
    let cam = Camera::default();
    drag.begin(pt(10.0, 10.0), PointerTarget::Note(id), pt(0.0, 0.0), &cam);
    assert!(!drag.begin(pt(50.0, 50.0), PointerTarget::Note(id), pt(0.0, 0.0), &cam));
    assert_eq!(drag.grab_offset(), Some(pt(10.0, 10.0)));
}

// =============================================================
// move_to
// =============================================================

#[test]
fn move_updates_view_only() {
    let (id, mut drag, mut view) = setup();
    let cam = Camera::default();
    drag.begin(pt(110.0, 110.0), PointerTarget::Note(id), pt(100.0, 100.0), &cam);

    let live = drag.move_to(pt(210.0, 160.0), &cam, &mut view);
    assert_eq!(live, Some(pt(200.0, 150.0)));
    assert_eq!(view.live_position, Some(pt(200.0, 150.0)));
    assert!(view.is_dragging());
    assert!(drag.is_active());
}

#[test]
fn move_without_begin_does_nothing() {
    let (_, mut drag, mut view) = setup();
    assert_eq!(drag.move_to(pt(1.0, 1.0), &Camera::default(), &mut view), None);
    assert_eq!(view, NoteView::default());
}

#[test]
fn note_does_not_jump_on_first_move() {
    let (id, mut drag, mut view) = setup();
    let cam = Camera { pan_x: 35.0, pan_y: -12.0, zoom: 1.7 };
    let note_canvas = pt(400.0, 250.0);
    let origin = cam.canvas_to_screen(note_canvas);
    let pointer = origin.add(pt(23.0, 41.0));

    drag.begin(pointer, PointerTarget::Note(id), origin, &cam);
    let live = drag.move_to(pointer, &cam, &mut view).unwrap();
    assert!(point_approx_eq(live, note_canvas));
}

// =============================================================
// end
// =============================================================

#[test]
fn end_commits_to_canvas_minus_grab_offset() {
    let (id, mut drag, mut view) = setup();
    let cam = Camera { pan_x: 50.0, pan_y: 20.0, zoom: 2.0 };
    drag.begin(pt(250.0, 220.0), PointerTarget::Note(id), pt(230.0, 200.0), &cam);
    drag.move_to(pt(300.0, 300.0), &cam, &mut view);

    let end = pt(410.0, 380.0);
    let commit = drag.end(end, &cam, &mut view).unwrap();
    let expected = cam.screen_to_canvas(end).sub(pt(10.0, 10.0));

    match commit {
        Commit::Position { id: committed, position } => {
            assert_eq!(committed, id);
            assert!(point_approx_eq(position, expected));
        }
        Commit::Size { .. } => panic!("expected a position commit"),
    }
    assert!(!drag.is_active());
    assert!(!view.is_dragging());
}

#[test]
fn end_without_begin_returns_none() {
    let (_, mut drag, mut view) = setup();
    assert!(drag.end(pt(0.0, 0.0), &Camera::default(), &mut view).is_none());
}

#[test]
fn click_without_move_commits_original_position() {
    let (id, mut drag, mut view) = setup();
    let cam = Camera { pan_x: 10.0, pan_y: 10.0, zoom: 0.5 };
    let note_canvas = pt(-80.0, 40.0);
    let origin = cam.canvas_to_screen(note_canvas);
    let pointer = origin.add(pt(5.0, 5.0));
    drag.begin(pointer, PointerTarget::Note(id), origin, &cam);
    let commit = drag.end(pointer, &cam, &mut view).unwrap();
    assert_eq!(commit.note_id(), id);
    match commit {
        Commit::Position { position, .. } => assert!(point_approx_eq(position, note_canvas)),
        Commit::Size { .. } => panic!("expected a position commit"),
    }
}

#[test]
fn cancel_clears_gesture_and_view() {
    let (id, mut drag, mut view) = setup();
    let cam = Camera::default();
    drag.begin(pt(0.0, 0.0), PointerTarget::Note(id), pt(0.0, 0.0), &cam);
    drag.move_to(pt(10.0, 10.0), &cam, &mut view);
    drag.cancel(&mut view);
    assert!(!drag.is_active());
    assert!(!view.is_dragging());
    assert!(drag.end(pt(10.0, 10.0), &cam, &mut view).is_none());
}

#[test]
fn drags_on_different_notes_are_independent() {
    let (a_id, mut a, mut a_view) = setup();
    let (b_id, mut b, mut b_view) = setup();
    let cam = Camera::default();

    a.begin(pt(5.0, 5.0), PointerTarget::Note(a_id), pt(0.0, 0.0), &cam);
    b.begin(pt(105.0, 105.0), PointerTarget::Note(b_id), pt(100.0, 100.0), &cam);
    a.move_to(pt(50.0, 50.0), &cam, &mut a_view);

    assert_eq!(a_view.live_position, Some(pt(45.0, 45.0)));
    assert_eq!(b_view.live_position, None);
    assert!(b.end(pt(105.0, 105.0), &cam, &mut b_view).is_some());
    assert!(a.is_active());
}

// =============================================================
// NoteView
// =============================================================

#[test]
fn view_falls_back_to_committed_geometry() {
    use crate::doc::{NewNote, Note};
    let note = Note::from_new(Uuid::new_v4(), "u", NewNote::default(), time::OffsetDateTime::UNIX_EPOCH);
    let mut view = NoteView::new();
    assert_eq!(view.position(&note), note.position());
    assert_eq!(view.size(&note), note.size());
    view.live_position = Some(pt(1.0, 2.0));
    assert_eq!(view.position(&note), pt(1.0, 2.0));
}
