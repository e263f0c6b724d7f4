use log::trace;

use super::Canvas;
use crate::event::{CanvasEvent, Orientation};
use crate::input::{CursorHint, Key, Modifiers, WheelDelta};
use crate::state::Mode;

impl Canvas {
    pub fn on_key(&mut self, key: Key, _modifiers: Modifiers) -> CursorHint {
        trace!("key {key:?} in {:?}", self.mode);
        match key {
            Key::Escape => self.cancel_drawing(),
            Key::Confirm => {
                if self.can_close_shape() {
                    self.finalise();
                }
            }
            Key::Delete => {
                if self.mode == Mode::Edit {
                    self.delete_selected();
                }
            }
            Key::Left | Key::Right | Key::Up | Key::Down => {
                if let Some(direction) = key.direction() {
                    self.move_one_unit(direction);
                }
            }
        }
        self.cursor
    }

    /// Wheel with both modifiers adjusts the overlay, with the multi-select
    /// modifier alone zooms, and otherwise scrolls.
    pub fn on_wheel(&mut self, delta: WheelDelta, modifiers: Modifiers) -> CursorHint {
        let WheelDelta { horizontal, vertical } = delta;
        if modifiers == Modifiers::BOTH && vertical != 0.0 {
            self.emit(CanvasEvent::LightRequest(vertical));
        } else if modifiers.is_multi_select() && vertical != 0.0 {
            self.emit(CanvasEvent::ZoomRequest(vertical));
        } else {
            if vertical != 0.0 {
                self.emit(CanvasEvent::ScrollRequest { delta: vertical, orientation: Orientation::Vertical });
            }
            if horizontal != 0.0 {
                self.emit(CanvasEvent::ScrollRequest { delta: horizontal, orientation: Orientation::Horizontal });
            }
        }
        self.cursor
    }
}
