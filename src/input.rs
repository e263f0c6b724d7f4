use egui::{Context, CursorIcon, Pos2, Rect, Vec2};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Draws, selects, drags and pans.
    Primary,
    /// Drags ghost copies of the selection.
    Secondary,
}

/// Buttons held down while the pointer moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldButtons {
    pub primary: bool,
    pub secondary: bool,
}

impl HeldButtons {
    pub const NONE: Self = Self { primary: false, secondary: false };
    pub const PRIMARY: Self = Self { primary: true, secondary: false };
    pub const SECONDARY: Self = Self { primary: false, secondary: true };

    pub fn any(&self) -> bool {
        self.primary || self.secondary
    }
}

/// Modifier keys, already mapped to their canvas meaning by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Add to / toggle within the selection (Ctrl).
    pub multi_select: bool,
    /// Start a rubber-band selection (Shift).
    pub rect_select: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { multi_select: false, rect_select: false };
    pub const MULTI_SELECT: Self = Self { multi_select: true, rect_select: false };
    pub const RECT_SELECT: Self = Self { multi_select: false, rect_select: true };
    pub const BOTH: Self = Self { multi_select: true, rect_select: true };

    /// Only the multi-select modifier is held.
    pub fn is_multi_select(&self) -> bool {
        self.multi_select && !self.rect_select
    }

    /// Only the rectangle-select modifier is held.
    pub fn is_rect_select(&self) -> bool {
        self.rect_select && !self.multi_select
    }
}

/// Keys the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// Enter / Return.
    Confirm,
    Delete,
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    /// Unit step for the arrow keys.
    pub fn direction(self) -> Option<Vec2> {
        match self {
            Self::Left => Some(Vec2::new(-1.0, 0.0)),
            Self::Right => Some(Vec2::new(1.0, 0.0)),
            Self::Up => Some(Vec2::new(0.0, -1.0)),
            Self::Down => Some(Vec2::new(0.0, 1.0)),
            Self::Escape | Self::Confirm | Self::Delete => None,
        }
    }
}

/// Wheel / trackpad scroll amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelDelta {
    pub horizontal: f32,
    pub vertical: f32,
}

/// A normalized input event. Positions are widget pixels relative to the
/// canvas' top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        pos: Pos2,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerUp {
        pos: Pos2,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMove {
        pos: Pos2,
        held: HeldButtons,
    },
    DoubleClick {
        pos: Pos2,
        button: PointerButton,
    },
    Key {
        key: Key,
        modifiers: Modifiers,
    },
    Wheel {
        delta: WheelDelta,
        modifiers: Modifiers,
    },
}

/// Cursor the host should show after an event was handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    /// Over a vertex, or snapping onto the first corner.
    Point,
    /// Create mode crosshair.
    Draw,
    /// Dragging shapes.
    Move,
    /// Over a shape body, or panning.
    Grab,
}

impl CursorHint {
    pub fn cursor_icon(self) -> CursorIcon {
        match self {
            Self::Default => CursorIcon::Default,
            Self::Point => CursorIcon::PointingHand,
            Self::Draw => CursorIcon::Crosshair,
            Self::Move => CursorIcon::Grabbing,
            Self::Grab => CursorIcon::Grab,
        }
    }
}

/// Converts raw egui input into canvas [`InputEvent`]s.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect this frame's events for a canvas occupying `canvas_rect`
    /// whose widget origin sits at `origin` on screen.
    ///
    /// Presses, double clicks and wheel only count inside `canvas_rect`;
    /// moves and releases are always forwarded so drags can finish outside.
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect, origin: Pos2) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let keyboard_free = !ctx.wants_keyboard_input();
        let to_widget = |pos: Pos2| (pos - origin).to_pos2();

        ctx.input(|input| {
            let modifiers = Modifiers {
                multi_select: input.modifiers.command,
                rect_select: input.modifiers.shift,
            };
            // A button released this frame was still down for the motion
            // that preceded the release.
            let down = |button| input.pointer.button_down(button) || input.pointer.button_released(button);
            let held = HeldButtons {
                primary: down(egui::PointerButton::Primary),
                secondary: down(egui::PointerButton::Secondary),
            };

            if let Some(pos) = input.pointer.latest_pos() {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove { pos: to_widget(pos), held });
                }
                self.last_pointer_pos = Some(pos);
            }

            for (egui_button, button) in [
                (egui::PointerButton::Primary, PointerButton::Primary),
                (egui::PointerButton::Secondary, PointerButton::Secondary),
            ] {
                if input.pointer.button_pressed(egui_button) {
                    if let Some(pos) = input.pointer.press_origin().filter(|pos| canvas_rect.contains(*pos)) {
                        events.push(InputEvent::PointerDown { pos: to_widget(pos), button, modifiers });
                    }
                }
                if input.pointer.button_double_clicked(egui_button) {
                    if let Some(pos) = input.pointer.interact_pos().filter(|pos| canvas_rect.contains(*pos)) {
                        events.push(InputEvent::DoubleClick { pos: to_widget(pos), button });
                    }
                }
                if input.pointer.button_released(egui_button) {
                    if let Some(pos) = input.pointer.interact_pos().or(self.last_pointer_pos) {
                        events.push(InputEvent::PointerUp { pos: to_widget(pos), button, modifiers });
                    }
                }
            }

            let hovering = input.pointer.hover_pos().is_some_and(|pos| canvas_rect.contains(pos));
            let scroll = input.raw_scroll_delta;
            if hovering && scroll != Vec2::ZERO {
                events.push(InputEvent::Wheel {
                    delta: WheelDelta { horizontal: scroll.x, vertical: scroll.y },
                    modifiers,
                });
            }

            if keyboard_free {
                for event in &input.raw.events {
                    if let egui::Event::Key { key, pressed: true, .. } = event {
                        if let Some(key) = map_key(*key) {
                            events.push(InputEvent::Key { key, modifiers });
                        }
                    }
                }
            }
        });

        events
    }
}

fn map_key(key: egui::Key) -> Option<Key> {
    match key {
        egui::Key::Escape => Some(Key::Escape),
        egui::Key::Enter => Some(Key::Confirm),
        egui::Key::Delete => Some(Key::Delete),
        egui::Key::ArrowLeft => Some(Key::Left),
        egui::Key::ArrowRight => Some(Key::Right),
        egui::Key::ArrowUp => Some(Key::Up),
        egui::Key::ArrowDown => Some(Key::Down),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn modifier_predicates_need_the_exact_combination() {
        assert!(Modifiers::MULTI_SELECT.is_multi_select());
        assert!(!Modifiers::BOTH.is_multi_select());
        assert!(Modifiers::RECT_SELECT.is_rect_select());
        assert!(!Modifiers::BOTH.is_rect_select());
        assert!(!Modifiers::NONE.is_rect_select());
    }

    #[test]
    fn arrow_keys_have_unit_directions() {
        assert_eq!(Key::Left.direction(), Some(vec2(-1.0, 0.0)));
        assert_eq!(Key::Down.direction(), Some(vec2(0.0, 1.0)));
        assert_eq!(Key::Delete.direction(), None);
    }

    #[test]
    fn key_mapping_ignores_unrelated_keys() {
        assert_eq!(map_key(egui::Key::Enter), Some(Key::Confirm));
        assert_eq!(map_key(egui::Key::ArrowUp), Some(Key::Up));
        assert_eq!(map_key(egui::Key::A), None);
    }

    #[test]
    fn pointer_press_is_translated_to_widget_space() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let canvas_rect = Rect::from_min_size(pos2(100.0, 50.0), vec2(200.0, 200.0));
        let mut raw = egui::RawInput::default();
        raw.events.push(egui::Event::PointerMoved(pos2(120.0, 70.0)));
        raw.events.push(egui::Event::PointerButton {
            pos: pos2(120.0, 70.0),
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::default(),
        });

        let mut events = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            events = handler.process_input(ctx, canvas_rect, canvas_rect.min);
        });

        assert!(events.contains(&InputEvent::PointerMove {
            pos: pos2(20.0, 20.0),
            held: HeldButtons::PRIMARY,
        }));
        assert!(events.contains(&InputEvent::PointerDown {
            pos: pos2(20.0, 20.0),
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }));
    }

    #[test]
    fn final_drag_motion_keeps_the_button_held() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let canvas_rect = Rect::from_min_size(pos2(100.0, 50.0), vec2(200.0, 200.0));
        let button = |pos, pressed| egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::default(),
        };

        let mut press = egui::RawInput::default();
        press.events.push(egui::Event::PointerMoved(pos2(120.0, 70.0)));
        press.events.push(button(pos2(120.0, 70.0), true));
        let _ = ctx.run(press, |ctx| {
            handler.process_input(ctx, canvas_rect, canvas_rect.min);
        });

        let mut release = egui::RawInput::default();
        release.events.push(egui::Event::PointerMoved(pos2(150.0, 90.0)));
        release.events.push(button(pos2(150.0, 90.0), false));
        let mut events = Vec::new();
        let _ = ctx.run(release, |ctx| {
            events = handler.process_input(ctx, canvas_rect, canvas_rect.min);
        });

        let moved = events.iter().position(|event| {
            *event == InputEvent::PointerMove { pos: pos2(50.0, 40.0), held: HeldButtons::PRIMARY }
        });
        let released = events.iter().position(|event| matches!(event, InputEvent::PointerUp { .. }));
        assert!(moved.is_some());
        assert!(moved < released);
    }
}
