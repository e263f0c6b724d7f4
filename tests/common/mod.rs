#![allow(dead_code)]

use egui::{pos2, vec2, Pos2};
use quadmark::{Canvas, CanvasEvent, EventQueue, HeldButtons, InputEvent, Key, Modifiers, PointerButton, Shape, ShapeId};

/// An edit-mode canvas holding a blank `width` x `height` image, plus a
/// queue that records everything it emits.
pub fn canvas_with_image(width: f32, height: f32) -> (Canvas, EventQueue) {
    let mut canvas = Canvas::new();
    let events = EventQueue::new();
    canvas.subscribe(Box::new(events.clone()));
    canvas.load_image(vec2(width, height));
    (canvas, events)
}

/// Same as [`canvas_with_image`] but already in create mode.
pub fn drawing_canvas(width: f32, height: f32) -> (Canvas, EventQueue) {
    let (mut canvas, events) = canvas_with_image(width, height);
    canvas.set_editing(false);
    events.drain();
    (canvas, events)
}

/// Load axis-aligned rectangles given as `(min, max)` pairs and return their ids.
pub fn load_rects(canvas: &mut Canvas, rects: &[((f32, f32), (f32, f32))]) -> Vec<ShapeId> {
    let shapes: Vec<Shape> = rects
        .iter()
        .enumerate()
        .map(|(i, (min, max))| Shape::rectangle(format!("shape{i}"), pos2(min.0, min.1), pos2(max.0, max.1)))
        .collect();
    let ids = shapes.iter().map(Shape::id).collect();
    canvas.load_shapes(shapes);
    ids
}

pub fn press(canvas: &mut Canvas, x: f32, y: f32) {
    press_with(canvas, x, y, PointerButton::Primary, Modifiers::NONE);
}

pub fn press_with(canvas: &mut Canvas, x: f32, y: f32, button: PointerButton, modifiers: Modifiers) {
    canvas.handle_input(&InputEvent::PointerDown { pos: pos2(x, y), button, modifiers });
}

pub fn release(canvas: &mut Canvas, x: f32, y: f32) {
    release_with(canvas, x, y, PointerButton::Primary);
}

pub fn release_with(canvas: &mut Canvas, x: f32, y: f32, button: PointerButton) {
    canvas.handle_input(&InputEvent::PointerUp { pos: pos2(x, y), button, modifiers: Modifiers::NONE });
}

/// Click: press and release at the same spot.
pub fn click(canvas: &mut Canvas, x: f32, y: f32) {
    press(canvas, x, y);
    release(canvas, x, y);
}

/// Two-click rectangle in create mode.
pub fn draw_rect(canvas: &mut Canvas, min: (f32, f32), max: (f32, f32)) {
    click(canvas, min.0, min.1);
    hover(canvas, max.0, max.1);
    click(canvas, max.0, max.1);
}

pub fn hover(canvas: &mut Canvas, x: f32, y: f32) {
    canvas.handle_input(&InputEvent::PointerMove { pos: pos2(x, y), held: HeldButtons::NONE });
}

pub fn drag_to(canvas: &mut Canvas, x: f32, y: f32) {
    canvas.handle_input(&InputEvent::PointerMove { pos: pos2(x, y), held: HeldButtons::PRIMARY });
}

pub fn key(canvas: &mut Canvas, key: Key) {
    canvas.handle_input(&InputEvent::Key { key, modifiers: Modifiers::NONE });
}

pub fn points(canvas: &Canvas, id: ShapeId) -> Vec<Pos2> {
    canvas.shape(id).map(|shape| shape.points().to_vec()).unwrap_or_default()
}

pub fn rect_points(min: (f32, f32), max: (f32, f32)) -> Vec<Pos2> {
    vec![pos2(min.0, min.1), pos2(max.0, min.1), pos2(max.0, max.1), pos2(min.0, max.1)]
}

pub fn new_shape_ids(events: &[CanvasEvent]) -> Vec<ShapeId> {
    events
        .iter()
        .filter_map(|event| match event {
            CanvasEvent::NewShape(id) => Some(*id),
            _ => None,
        })
        .collect()
}
