mod common;

use common::*;
use egui::pos2;
use quadmark::{CanvasError, CanvasEvent, HeldButtons, InputEvent, Modifiers, PointerButton, ShapeId};

fn one_shape() -> (quadmark::Canvas, quadmark::EventQueue, ShapeId) {
    let (mut canvas, events) = canvas_with_image(200.0, 200.0);
    let ids = load_rects(&mut canvas, &[((10.0, 10.0), (50.0, 50.0))]);
    events.drain();
    (canvas, events, ids[0])
}

fn secondary_drag(canvas: &mut quadmark::Canvas, from: (f32, f32), samples: &[(f32, f32)]) {
    press_with(canvas, from.0, from.1, PointerButton::Secondary, Modifiers::NONE);
    for (x, y) in samples {
        canvas.handle_input(&InputEvent::PointerMove { pos: pos2(*x, *y), held: HeldButtons::SECONDARY });
    }
    let last = samples.last().copied().unwrap_or(from);
    release_with(canvas, last.0, last.1, PointerButton::Secondary);
}

#[test]
fn test_secondary_drag_moves_ghost_copies() {
    let (mut canvas, events, a) = one_shape();

    secondary_drag(&mut canvas, (30.0, 30.0), &[(35.0, 35.0), (45.0, 45.0)]);

    assert_eq!(canvas.selected_ids(), &[a]);
    let copies = canvas.selection().copies();
    assert_eq!(copies.len(), 1);
    assert_ne!(copies[0].id(), a);
    assert_eq!(copies[0].points(), rect_points((25.0, 25.0), (65.0, 65.0)).as_slice());
    // The original stays put until the host decides.
    assert_eq!(points(&canvas, a), rect_points((10.0, 10.0), (50.0, 50.0)));
    assert_eq!(canvas.snapshot().copies.len(), 1);

    let emitted = events.drain();
    assert_eq!(
        emitted.last(),
        Some(&CanvasEvent::ContextMenuRequested { has_copies: true, at: pos2(45.0, 45.0) })
    );
}

#[test]
fn test_end_move_with_copy_adds_duplicates() {
    let (mut canvas, events, a) = one_shape();
    secondary_drag(&mut canvas, (30.0, 30.0), &[(35.0, 35.0), (45.0, 45.0)]);
    events.drain();

    canvas.end_move(true).unwrap();

    assert_eq!(canvas.shapes().len(), 2);
    let copy = canvas.selected_ids()[0];
    assert_ne!(copy, a);
    assert!(canvas.shape(copy).unwrap().selected);
    assert!(!canvas.shape(a).unwrap().selected);
    assert_eq!(points(&canvas, copy), rect_points((25.0, 25.0), (65.0, 65.0)));
    assert_eq!(points(&canvas, a), rect_points((10.0, 10.0), (50.0, 50.0)));
    assert!(!canvas.selection().has_copies());
    assert_eq!(events.drain(), vec![CanvasEvent::SelectionChanged(vec![copy])]);
}

#[test]
fn test_end_move_without_copy_moves_originals() {
    let (mut canvas, _events, a) = one_shape();
    secondary_drag(&mut canvas, (30.0, 30.0), &[(35.0, 35.0), (45.0, 45.0)]);

    canvas.end_move(false).unwrap();

    assert_eq!(canvas.shapes().len(), 1);
    assert_eq!(canvas.selected_ids(), &[a]);
    assert_eq!(points(&canvas, a), rect_points((25.0, 25.0), (65.0, 65.0)));
    assert!(!canvas.selection().has_copies());
}

#[test]
fn test_cancel_copy_discards_ghosts() {
    let (mut canvas, _events, a) = one_shape();
    secondary_drag(&mut canvas, (30.0, 30.0), &[(35.0, 35.0), (45.0, 45.0)]);

    assert!(canvas.cancel_copy());
    assert!(!canvas.cancel_copy());
    assert_eq!(canvas.end_move(true), Err(CanvasError::NoPendingCopy));
    assert_eq!(points(&canvas, a), rect_points((10.0, 10.0), (50.0, 50.0)));
    assert_eq!(canvas.shapes().len(), 1);
}

#[test]
fn test_end_move_needs_a_selection() {
    let (mut canvas, _events, _a) = one_shape();
    assert_eq!(canvas.end_move(false), Err(CanvasError::NoSelection));
}

#[test]
fn test_secondary_click_without_drag_has_no_copies() {
    let (mut canvas, events, a) = one_shape();

    secondary_drag(&mut canvas, (30.0, 30.0), &[]);

    assert_eq!(canvas.selected_ids(), &[a]);
    assert_eq!(
        events.drain().last(),
        Some(&CanvasEvent::ContextMenuRequested { has_copies: false, at: pos2(30.0, 30.0) })
    );
}

#[test]
fn test_secondary_drag_on_background_copies_nothing() {
    let (mut canvas, _events, _a) = one_shape();

    secondary_drag(&mut canvas, (150.0, 150.0), &[(160.0, 160.0), (170.0, 170.0)]);

    assert!(canvas.selected_ids().is_empty());
    assert!(!canvas.selection().has_copies());
}

#[test]
fn test_copy_selected_shapes_duplicates_in_place() {
    let (mut canvas, _events, a) = one_shape();
    assert_eq!(canvas.copy_selected_shapes(), Err(CanvasError::NoSelection));

    canvas.select_shapes(&[a]).unwrap();
    let copies = canvas.copy_selected_shapes().unwrap();

    assert_eq!(copies.len(), 1);
    assert_eq!(canvas.selected_ids(), copies.as_slice());
    assert_eq!(canvas.shapes().len(), 2);
    assert_eq!(points(&canvas, copies[0]), points(&canvas, a));
    assert_eq!(canvas.shape(copies[0]).unwrap().label, canvas.shape(a).unwrap().label);
}

#[test]
fn test_ghost_copies_stay_inside_image() {
    let (mut canvas, _events, _a) = one_shape();

    secondary_drag(&mut canvas, (30.0, 30.0), &[(35.0, 35.0), (199.0, 199.0)]);

    let copy = &canvas.selection().copies()[0];
    let rect = copy.bounding_rect();
    assert_eq!(rect.max, pos2(200.0, 200.0));
    assert!(rect.min.x >= 0.0 && rect.min.y >= 0.0);
}
