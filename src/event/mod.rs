mod bus;
mod events;

pub use bus::{EventBus, EventQueue};
pub use events::{CanvasEvent, Orientation};

/// Receives canvas notifications synchronously, in emission order.
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &CanvasEvent);
}
