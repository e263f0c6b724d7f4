#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod geometry;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod selection;
pub mod shape;
pub mod snapshot;
pub mod state;
pub mod transform;

pub use app::AnnotatorApp;
pub use canvas::{Canvas, MoveTarget, PointSelection};
pub use config::CanvasConfig;
pub use document::Document;
pub use error::{CanvasError, CanvasResult};
pub use event::{CanvasEvent, EventBus, EventHandler, EventQueue, Orientation};
pub use input::{CursorHint, HeldButtons, InputEvent, Key, Modifiers, PointerButton, WheelDelta};
pub use persistence::{AnnotationFile, PersistenceError, PersistenceResult};
pub use renderer::Renderer;
pub use selection::Selection;
pub use shape::{Shape, ShapeId, ShapeRecord};
pub use snapshot::{RenderSnapshot, ShapeView};
pub use state::{DrawState, Interaction, Mode};
pub use transform::ViewTransform;
