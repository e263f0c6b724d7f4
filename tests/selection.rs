mod common;

use common::*;
use quadmark::shape::HighlightMode;
use quadmark::{CanvasError, CanvasEvent, CursorHint, Interaction, Key, Modifiers, PointerButton, ShapeId};

const A: ((f32, f32), (f32, f32)) = ((10.0, 10.0), (110.0, 110.0));
const B: ((f32, f32), (f32, f32)) = ((200.0, 200.0), (300.0, 300.0));

fn two_shapes() -> (quadmark::Canvas, quadmark::EventQueue, ShapeId, ShapeId) {
    let (mut canvas, events) = canvas_with_image(400.0, 400.0);
    let ids = load_rects(&mut canvas, &[A, B]);
    events.drain();
    (canvas, events, ids[0], ids[1])
}

#[test]
fn test_click_selects_and_promotes_shape() {
    let (mut canvas, events, a, _b) = two_shapes();

    click(&mut canvas, 60.0, 60.0);

    assert_eq!(canvas.selected_ids(), &[a]);
    assert!(canvas.shape(a).unwrap().selected);
    assert_eq!(canvas.shapes().last().unwrap().id(), a);
    assert!(events.drain().contains(&CanvasEvent::SelectionChanged(vec![a])));
}

#[test]
fn test_topmost_shape_wins_overlap() {
    let (mut canvas, _events) = canvas_with_image(400.0, 400.0);
    let ids = load_rects(&mut canvas, &[A, ((50.0, 50.0), (150.0, 150.0))]);

    click(&mut canvas, 80.0, 80.0);
    assert_eq!(canvas.selected_ids(), &[ids[1]]);
}

#[test]
fn test_click_on_background_clears_selection() {
    let (mut canvas, events, a, _b) = two_shapes();
    click(&mut canvas, 60.0, 60.0);
    events.drain();

    press(&mut canvas, 350.0, 350.0);
    assert!(canvas.selected_ids().is_empty());
    assert!(!canvas.shape(a).unwrap().selected);
    assert!(matches!(canvas.interaction(), Interaction::Panning { .. }));
    assert_eq!(events.drain(), vec![CanvasEvent::SelectionChanged(Vec::new())]);

    release(&mut canvas, 350.0, 350.0);
    assert_eq!(canvas.interaction(), &Interaction::Idle);
}

#[test]
fn test_multi_select_toggles_membership() {
    let (mut canvas, _events, a, b) = two_shapes();

    click(&mut canvas, 60.0, 60.0);
    press_with(&mut canvas, 250.0, 250.0, PointerButton::Primary, Modifiers::MULTI_SELECT);
    release(&mut canvas, 250.0, 250.0);
    assert_eq!(canvas.selected_ids(), &[a, b]);

    press_with(&mut canvas, 60.0, 60.0, PointerButton::Primary, Modifiers::MULTI_SELECT);
    release(&mut canvas, 60.0, 60.0);
    assert_eq!(canvas.selected_ids(), &[b]);
    assert!(!canvas.shape(a).unwrap().selected);
}

#[test]
fn test_plain_click_inside_selection_keeps_group() {
    let (mut canvas, _events, a, b) = two_shapes();
    canvas.select_shapes(&[a, b]).unwrap();

    click(&mut canvas, 60.0, 60.0);
    assert_eq!(canvas.selected_ids(), &[a, b]);
}

#[test]
fn test_vertex_press_selects_only_that_shape() {
    let (mut canvas, _events, a, b) = two_shapes();
    canvas.select_shapes(&[b]).unwrap();

    hover(&mut canvas, 112.0, 108.0);
    assert_eq!(canvas.interaction(), &Interaction::Hovering { shape: a, vertex: Some(2) });

    press(&mut canvas, 112.0, 108.0);
    assert_eq!(canvas.selected_ids(), &[a]);
    assert_eq!(canvas.interaction(), &Interaction::DraggingVertex { shape: a, vertex: 2 });
    let highlight = canvas.shape(a).unwrap().highlight().unwrap();
    assert_eq!(highlight.index, 2);
    assert_eq!(highlight.mode, HighlightMode::MoveVertex);
}

#[test]
fn test_hover_tracks_vertex_body_and_background() {
    let (mut canvas, _events, a, _b) = two_shapes();

    assert_eq!(canvas.handle_input(&hover_event(60.0, 60.0)), CursorHint::Grab);
    assert_eq!(canvas.interaction(), &Interaction::Hovering { shape: a, vertex: None });

    assert_eq!(canvas.handle_input(&hover_event(111.0, 111.0)), CursorHint::Point);
    let highlight = canvas.shape(a).unwrap().highlight().unwrap();
    assert_eq!((highlight.index, highlight.mode), (2, HighlightMode::NearVertex));

    assert_eq!(canvas.handle_input(&hover_event(350.0, 350.0)), CursorHint::Default);
    assert_eq!(canvas.interaction(), &Interaction::Idle);
    assert!(canvas.shape(a).unwrap().highlight().is_none());
}

fn hover_event(x: f32, y: f32) -> quadmark::InputEvent {
    quadmark::InputEvent::PointerMove { pos: egui::pos2(x, y), held: quadmark::HeldButtons::NONE }
}

#[test]
fn test_rubber_band_adds_fully_contained_shapes() {
    let (mut canvas, _events, a, b) = two_shapes();

    press_with(&mut canvas, 380.0, 5.0, PointerButton::Primary, Modifiers::RECT_SELECT);
    assert!(matches!(canvas.interaction(), Interaction::RubberBand { .. }));

    drag_to(&mut canvas, 150.0, 380.0);
    let band = canvas.snapshot().rubber_band.unwrap();
    assert_eq!(band, egui::Rect::from_min_max(egui::pos2(150.0, 5.0), egui::pos2(380.0, 380.0)));

    drag_to(&mut canvas, 2.0, 380.0);
    release(&mut canvas, 2.0, 380.0);

    let mut selected = canvas.selected_ids().to_vec();
    selected.sort();
    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(selected, expected);
    assert_eq!(canvas.interaction(), &Interaction::Idle);
}

#[test]
fn test_rubber_band_skips_partially_covered_shapes() {
    let (mut canvas, _events, _a, b) = two_shapes();

    press_with(&mut canvas, 380.0, 5.0, PointerButton::Primary, Modifiers::RECT_SELECT);
    drag_to(&mut canvas, 50.0, 380.0);
    release(&mut canvas, 50.0, 380.0);

    assert_eq!(canvas.selected_ids(), &[b]);
}

#[test]
fn test_hidden_shapes_cannot_be_picked() {
    let (mut canvas, _events, a, _b) = two_shapes();
    canvas.set_shape_visible(a, false);

    click(&mut canvas, 60.0, 60.0);
    assert!(canvas.selected_ids().is_empty());
    assert!(canvas.snapshot().shapes.iter().all(|view| view.shape.id() != a));
}

#[test]
fn test_delete_key_removes_selection() {
    let (mut canvas, events, a, b) = two_shapes();
    click(&mut canvas, 60.0, 60.0);
    events.drain();

    key(&mut canvas, Key::Delete);

    assert_eq!(canvas.shapes().len(), 1);
    assert_eq!(canvas.shapes()[0].id(), b);
    assert!(canvas.shape(a).is_none());
    assert!(canvas.selected_ids().is_empty());
    assert_eq!(events.drain(), vec![CanvasEvent::SelectionChanged(Vec::new())]);
}

#[test]
fn test_delete_selected_returns_removed_shapes() {
    let (mut canvas, _events, a, b) = two_shapes();
    assert!(canvas.delete_selected().is_empty());

    canvas.select_shapes(&[a, b]).unwrap();
    let deleted = canvas.delete_selected();
    assert_eq!(deleted.iter().map(|shape| shape.id()).collect::<Vec<_>>(), vec![a, b]);
    assert!(canvas.shapes().is_empty());
}

#[test]
fn test_delete_shape_twice_fails() {
    let (mut canvas, _events, a, b) = two_shapes();
    canvas.select_shapes(&[a, b]).unwrap();

    let removed = canvas.delete_shape(b).unwrap();
    assert_eq!(removed.id(), b);
    assert_eq!(canvas.selected_ids(), &[a]);
    assert_eq!(canvas.delete_shape(b).unwrap_err(), CanvasError::UnknownShape(b));
}

#[test]
fn test_selecting_unknown_shape_fails() {
    let (mut canvas, _events, a, _b) = two_shapes();
    let stranger = ShapeId::new();

    assert_eq!(canvas.select_shapes(&[a, stranger]), Err(CanvasError::UnknownShape(stranger)));
    assert!(canvas.selected_ids().is_empty());
}

#[test]
fn test_hide_background_paints_only_selection() {
    let (mut canvas, _events, a, _b) = two_shapes();
    canvas.hide_background_shapes(true);

    click(&mut canvas, 60.0, 60.0);
    let painted: Vec<ShapeId> = canvas.snapshot().shapes.iter().map(|view| view.shape.id()).collect();
    assert_eq!(painted, vec![a]);

    canvas.de_select_shapes();
    assert_eq!(canvas.snapshot().shapes.len(), 2);
}

#[test]
fn test_selected_and_hovered_shapes_are_filled() {
    let (mut canvas, _events, a, b) = two_shapes();
    click(&mut canvas, 60.0, 60.0);
    hover(&mut canvas, 250.0, 250.0);

    let snapshot = canvas.snapshot();
    let fill = |id: ShapeId| snapshot.shapes.iter().find(|view| view.shape.id() == id).unwrap().fill;
    assert!(fill(a));
    assert!(fill(b));

    canvas.set_highlight_polygons(true);
    assert!(canvas.snapshot().shapes.iter().all(|view| view.fill));
}

#[test]
fn test_entering_create_mode_clears_selection_and_hover() {
    let (mut canvas, _events, a, _b) = two_shapes();
    click(&mut canvas, 60.0, 60.0);
    hover(&mut canvas, 60.0, 60.0);

    canvas.set_editing(false);
    assert!(canvas.selected_ids().is_empty());
    assert!(!canvas.shape(a).unwrap().selected);
    assert_eq!(canvas.interaction(), &Interaction::Idle);
}

#[test]
fn test_load_shapes_resets_selection() {
    let (mut canvas, events, a, _b) = two_shapes();
    canvas.select_shapes(&[a]).unwrap();
    events.drain();

    load_rects(&mut canvas, &[B]);
    assert!(canvas.selected_ids().is_empty());
    assert_eq!(events.drain(), vec![CanvasEvent::SelectionChanged(Vec::new())]);
}

fn highlighted(canvas: &quadmark::Canvas) -> Vec<ShapeId> {
    canvas.shapes().iter().filter(|shape| shape.highlight().is_some()).map(|shape| shape.id()).collect()
}

#[test]
fn test_secondary_press_on_vertex_leaves_no_stale_highlight() {
    let (mut canvas, _events, a, b) = two_shapes();

    hover(&mut canvas, 10.0, 10.0);
    assert_eq!(highlighted(&canvas), vec![a]);
    press_with(&mut canvas, 10.0, 10.0, PointerButton::Secondary, Modifiers::NONE);
    release_with(&mut canvas, 10.0, 10.0, PointerButton::Secondary);
    canvas.cancel_copy();
    hover(&mut canvas, 200.0, 200.0);

    assert_eq!(highlighted(&canvas), vec![b]);
    assert_eq!(canvas.shape(b).unwrap().highlight().unwrap().mode, HighlightMode::NearVertex);
}

#[test]
fn test_rect_select_press_on_vertex_leaves_no_stale_highlight() {
    let (mut canvas, _events, _a, b) = two_shapes();

    hover(&mut canvas, 10.0, 10.0);
    press_with(&mut canvas, 10.0, 10.0, PointerButton::Primary, Modifiers::RECT_SELECT);
    release(&mut canvas, 10.0, 10.0);
    hover(&mut canvas, 200.0, 200.0);

    assert_eq!(highlighted(&canvas), vec![b]);
}
