mod draw_state;
mod editor_state;

pub use draw_state::DrawState;
pub use editor_state::{Interaction, Mode};
