use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::geometry::hit_testing::VERTEX_EPSILON;
use crate::persistence::{PersistenceError, PersistenceResult};

pub const DEFAULT_LABEL_FONT_SIZE: u32 = 16;
pub const MIN_LABEL_FONT_SIZE: u32 = 2;

/// Tunables of the annotation canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old config
pub struct CanvasConfig {
    /// Vertex pick radius in image units.
    pub epsilon: f32,
    /// Constrain new and resized shapes to squares.
    pub square_mode: bool,
    /// Paint only selected shapes while a selection exists.
    pub hide_background: bool,
    /// Fill every shape, not only selected and hovered ones.
    pub highlight_polygons: bool,
    pub label_font_size: u32,
    /// Color of the in-progress shape and its guide rectangle.
    pub drawing_color: Color32,
    /// Distance covered by one arrow-key nudge.
    pub nudge_step: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            epsilon: VERTEX_EPSILON,
            square_mode: false,
            hide_background: false,
            highlight_polygons: false,
            label_font_size: DEFAULT_LABEL_FONT_SIZE,
            drawing_color: Color32::from_rgb(0, 0, 255),
            nudge_step: 1.0,
        }
    }
}

impl CanvasConfig {
    pub fn load(path: &Path) -> PersistenceResult<Self> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded canvas config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> PersistenceResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> PersistenceResult<()> {
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(PersistenceError::InvalidData(format!("epsilon must be a non-negative number, got {}", self.epsilon)));
        }
        if !(self.nudge_step.is_finite() && self.nudge_step > 0.0) {
            return Err(PersistenceError::InvalidData(format!("nudge_step must be positive, got {}", self.nudge_step)));
        }
        Ok(())
    }
}
